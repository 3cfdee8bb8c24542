//! The closed set of object kinds a document holds.

use pbx_plist::{CommentedString, PlistDictionary, PlistValue};
use pbx_store::{Narrow, ObjectStore, Reference, StoreObject};
use pbx_types::Identifier;
use tracing::warn;

use crate::decode::{DecodeContext, Fields};
use crate::element::FileElement;
use crate::error::ObjectsResult;
use crate::file_reference::FileReference;
use crate::group::{Group, VariantGroup, VersionGroup};
use crate::projection;
use crate::unknown::UnknownObject;

/// One object of a project document.
///
/// Callers holding a [`Reference`] resolve it through the store and either
/// match on this enum or narrow it with [`Reference::object`], which reports
/// a wrong variant as a type mismatch rather than "not found".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PbxObject {
    Group(Group),
    VariantGroup(VariantGroup),
    VersionGroup(VersionGroup),
    FileReference(FileReference),
    Unknown(UnknownObject),
}

impl PbxObject {
    /// Decode the dictionary of object `id`, dispatching on its `isa`.
    ///
    /// Reference fields are interned through `ctx`; referenced objects are
    /// not decoded here.
    pub fn decode(
        id: &Identifier,
        dict: &PlistDictionary,
        ctx: &mut DecodeContext<'_>,
    ) -> ObjectsResult<Self> {
        let fields = Fields::new(id, dict);
        let isa = fields.isa()?;
        let object = match isa {
            Group::ISA => Self::Group(Group::decode(&fields, ctx)?),
            VariantGroup::ISA => Self::VariantGroup(VariantGroup::decode(&fields, ctx)?),
            VersionGroup::ISA => Self::VersionGroup(VersionGroup::decode(&fields, ctx)?),
            FileReference::ISA => Self::FileReference(FileReference::decode(&fields)?),
            _ => return Ok(Self::Unknown(UnknownObject::decode(&fields)?)),
        };
        let dropped = fields.unread_keys(&[FileElement::KEYS, object.modelled_keys()]);
        if !dropped.is_empty() {
            warn!(id = %id, isa, ?dropped, "dropping unmodelled keys");
        }
        Ok(object)
    }

    /// Keys a typed kind reads beyond the file element attributes.
    fn modelled_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Group(_) => Group::KEYS,
            Self::VariantGroup(_) => VariantGroup::KEYS,
            Self::VersionGroup(_) => VersionGroup::KEYS,
            Self::FileReference(_) => FileReference::KEYS,
            Self::Unknown(_) => &[],
        }
    }

    /// The shared file element attributes, for groups and file references.
    pub fn file_element(&self) -> Option<&FileElement> {
        match self {
            Self::Group(g) => Some(&g.element),
            Self::VariantGroup(g) => Some(&g.element),
            Self::VersionGroup(g) => Some(&g.element),
            Self::FileReference(f) => Some(&f.element),
            Self::Unknown(_) => None,
        }
    }

    pub fn file_element_mut(&mut self) -> Option<&mut FileElement> {
        match self {
            Self::Group(g) => Some(&mut g.element),
            Self::VariantGroup(g) => Some(&mut g.element),
            Self::VersionGroup(g) => Some(&mut g.element),
            Self::FileReference(f) => Some(&mut f.element),
            Self::Unknown(_) => None,
        }
    }

    /// Ordered children, for the group kinds.
    pub fn children(&self) -> Option<&[Reference]> {
        match self {
            Self::Group(g) => Some(&g.children),
            Self::VariantGroup(g) => Some(&g.children),
            Self::VersionGroup(g) => Some(&g.children),
            Self::FileReference(_) | Self::Unknown(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Reference>> {
        match self {
            Self::Group(g) => Some(&mut g.children),
            Self::VariantGroup(g) => Some(&mut g.children),
            Self::VersionGroup(g) => Some(&mut g.children),
            Self::FileReference(_) | Self::Unknown(_) => None,
        }
    }

    /// The human-readable name used in comments: name, else path, else a
    /// per-kind default.
    pub fn display_label(&self) -> Option<&str> {
        match self {
            Self::Unknown(u) => Some(u.display_label()),
            other => other.file_element().and_then(FileElement::display_label),
        }
    }

    /// The `(key, value)` entry for this object in the document's `objects`
    /// dictionary.
    ///
    /// The key is `id` annotated with this object's label. The value has
    /// `isa` first and every other key in ascending order, so projecting the
    /// same state twice gives the same result.
    pub fn projection(
        &self,
        objects: &ObjectStore<PbxObject>,
        id: &Identifier,
    ) -> (CommentedString, PlistValue) {
        let mut dict = PlistDictionary::new();
        match self {
            Self::Group(g) => g.project_into(&mut dict, objects),
            Self::VariantGroup(g) => g.project_into(&mut dict, objects),
            Self::VersionGroup(g) => g.project_into(&mut dict, objects),
            Self::FileReference(f) => f.project_into(&mut dict),
            Self::Unknown(u) => u.project_into(&mut dict, objects),
        }
        let key = CommentedString::with_comment(
            id.as_str(),
            self.display_label().map(str::to_string),
        );
        (key, PlistValue::Dictionary(projection::canonical(dict)))
    }
}

impl StoreObject for PbxObject {
    fn isa(&self) -> &str {
        match self {
            Self::Group(_) => Group::ISA,
            Self::VariantGroup(_) => VariantGroup::ISA,
            Self::VersionGroup(_) => VersionGroup::ISA,
            Self::FileReference(_) => FileReference::ISA,
            Self::Unknown(u) => &u.isa,
        }
    }

    fn identifier_seed(&self) -> String {
        self.display_label().unwrap_or_default().to_string()
    }
}

macro_rules! narrow_variant {
    ($ty:ty, $variant:ident) => {
        impl Narrow<PbxObject> for $ty {
            const ISA: &'static str = <$ty>::ISA;

            fn narrow(object: &PbxObject) -> Option<&Self> {
                match object {
                    PbxObject::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn narrow_mut(object: &mut PbxObject) -> Option<&mut Self> {
                match object {
                    PbxObject::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

narrow_variant!(Group, Group);
narrow_variant!(VariantGroup, VariantGroup);
narrow_variant!(VersionGroup, VersionGroup);
narrow_variant!(FileReference, FileReference);

impl Narrow<PbxObject> for UnknownObject {
    const ISA: &'static str = "unknown object";

    fn narrow(object: &PbxObject) -> Option<&Self> {
        match object {
            PbxObject::Unknown(inner) => Some(inner),
            _ => None,
        }
    }

    fn narrow_mut(object: &mut PbxObject) -> Option<&mut Self> {
        match object {
            PbxObject::Unknown(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Any group or file reference, viewed through its shared attributes.
impl Narrow<PbxObject> for FileElement {
    const ISA: &'static str = "PBXFileElement";

    fn narrow(object: &PbxObject) -> Option<&Self> {
        object.file_element()
    }

    fn narrow_mut(object: &mut PbxObject) -> Option<&mut Self> {
        object.file_element_mut()
    }
}
