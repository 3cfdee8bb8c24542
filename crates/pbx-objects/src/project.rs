//! The project document: top-level metadata plus the object graph.

use pbx_plist::{PlistDictionary, PlistValue};
use pbx_store::{ObjectStore, Reference, ReferenceRepository};
use tracing::debug;

use crate::decode::DecodeContext;
use crate::error::{ObjectsError, ObjectsResult};
use crate::file_reference::FileReference;
use crate::group::Group;
use crate::object::PbxObject;
use crate::projection;
use crate::unknown::UnknownObject;

/// One project document.
///
/// The document owns its object store and the reference repository used to
/// decode it. Both live and die with the document; nothing is shared
/// between documents.
#[derive(Debug)]
pub struct PbxProj {
    pub archive_version: String,
    pub object_version: String,
    pub classes: PlistDictionary,
    pub root_object: Option<Reference>,
    objects: ObjectStore<PbxObject>,
    references: ReferenceRepository,
}

impl Default for PbxProj {
    fn default() -> Self {
        Self {
            archive_version: "1".into(),
            object_version: "46".into(),
            classes: PlistDictionary::new(),
            root_object: None,
            objects: ObjectStore::new(),
            references: ReferenceRepository::new(),
        }
    }
}

impl PbxProj {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a whole document tree.
    ///
    /// Objects are decoded one at a time in document order. A child that is
    /// listed before its own entry gets a reference right away; the entry
    /// materializes it later. Any malformed object aborts the decode.
    pub fn decode(value: &PlistValue) -> ObjectsResult<Self> {
        let top = value
            .as_dictionary()
            .ok_or_else(|| ObjectsError::MalformedDocument(format!(
                "expected dictionary, found {}",
                value.shape()
            )))?;

        let mut proj = Self::new();
        if let Some(version) = top_string(top, "archiveVersion")? {
            proj.archive_version = version;
        }
        if let Some(version) = top_string(top, "objectVersion")? {
            proj.object_version = version;
        }
        if let Some(classes) = top.get("classes") {
            proj.classes = classes
                .as_dictionary()
                .cloned()
                .ok_or_else(|| ObjectsError::MalformedDocument("classes: expected dictionary".into()))?;
        }

        let entries = top
            .get("objects")
            .ok_or_else(|| ObjectsError::MalformedDocument("missing objects".into()))?
            .as_dictionary()
            .ok_or_else(|| ObjectsError::MalformedDocument("objects: expected dictionary".into()))?;

        for (key, entry) in entries {
            let reference = proj
                .references
                .get_or_create(key.as_str(), &proj.objects)
                .map_err(|e| ObjectsError::MalformedDocument(format!("object key {key:?}: {e}")))?;
            let id = reference.id();
            let dict = entry.as_dictionary().ok_or_else(|| ObjectsError::MalformedObject {
                id: id.clone(),
                reason: format!("expected dictionary, found {}", entry.shape()),
            })?;
            let object = {
                let mut ctx = DecodeContext::new(&proj.objects, &mut proj.references);
                PbxObject::decode(id, dict, &mut ctx)?
            };
            proj.objects.insert(id.clone(), object);
        }

        if let Some(raw) = top_string(top, "rootObject")? {
            let root = proj
                .references
                .get_or_create(&raw, &proj.objects)
                .map_err(|e| ObjectsError::MalformedDocument(format!("rootObject: {e}")))?;
            proj.root_object = Some(root);
        }

        debug!(
            objects = proj.objects.len(),
            references = proj.references.len(),
            "decoded project"
        );
        Ok(proj)
    }

    /// Project the whole document back into a plist tree.
    ///
    /// Objects appear in identifier order. Projecting an unchanged document
    /// twice gives equal trees.
    pub fn to_plist(&self) -> PlistValue {
        let mut objects = PlistDictionary::new();
        for (id, object) in self.objects.iter() {
            let (key, value) = object.projection(&self.objects, id);
            objects.insert(key, value);
        }

        let mut top = PlistDictionary::new();
        top.insert("archiveVersion".into(), PlistValue::string(self.archive_version.as_str()));
        top.insert("classes".into(), PlistValue::Dictionary(self.classes.clone()));
        top.insert("objectVersion".into(), PlistValue::string(self.object_version.as_str()));
        top.insert("objects".into(), PlistValue::Dictionary(objects));
        if let Some(root) = &self.root_object {
            top.insert("rootObject".into(), projection::reference_value(&self.objects, root));
        }
        PlistValue::Dictionary(top)
    }

    /// Insert an object created in memory under a freshly minted identifier.
    pub fn add_object(&mut self, object: PbxObject) -> Reference {
        let reference = self.objects.add_object(object);
        self.references.register(&reference)
    }

    /// The object store, for lookups and typed views.
    pub fn objects(&self) -> &ObjectStore<PbxObject> {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectStore<PbxObject> {
        &mut self.objects
    }

    /// The reference repository used while decoding.
    pub fn references(&self) -> &ReferenceRepository {
        &self.references
    }

    /// Get or create the handle for a raw identifier.
    pub fn reference(&mut self, raw: &str) -> ObjectsResult<Reference> {
        Ok(self.references.get_or_create(raw, &self.objects)?)
    }

    pub fn object(&self, reference: &Reference) -> ObjectsResult<&PbxObject> {
        Ok(self.objects.object(reference)?)
    }

    pub fn object_mut(&mut self, reference: &Reference) -> ObjectsResult<&mut PbxObject> {
        Ok(self.objects.object_mut(reference)?)
    }

    /// Every `PBXGroup`, in identifier order.
    pub fn groups(&self) -> impl Iterator<Item = (Reference, &Group)> {
        self.objects.iter_of::<Group>()
    }

    /// Every `PBXFileReference`, in identifier order.
    pub fn file_references(&self) -> impl Iterator<Item = (Reference, &FileReference)> {
        self.objects.iter_of::<FileReference>()
    }

    /// The root project object.
    pub fn project_object(&self) -> ObjectsResult<&UnknownObject> {
        let root = self.root_object.as_ref().ok_or(ObjectsError::MissingRoot)?;
        Ok(root.object::<UnknownObject, _>(&self.objects)?)
    }

    /// The main group named by the root project object.
    pub fn root_group(&self) -> ObjectsResult<Reference> {
        let raw = self
            .project_object()?
            .string("mainGroup")
            .ok_or(ObjectsError::MissingRoot)?;
        let id = self
            .objects
            .identifier(raw)
            .ok_or(ObjectsError::MissingRoot)?;
        let reference = Reference::new(id.clone());
        reference.object::<Group, _>(&self.objects)?;
        Ok(reference)
    }

    /// The comment a reference to `reference` would carry, if it resolves.
    pub fn comment_for(&self, reference: &Reference) -> Option<String> {
        projection::label(&self.objects, reference)
    }
}

fn top_string(top: &PlistDictionary, key: &str) -> ObjectsResult<Option<String>> {
    match top.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ObjectsError::MalformedDocument(format!(
                "{key}: expected string, found {}",
                value.shape()
            ))),
    }
}
