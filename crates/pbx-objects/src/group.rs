//! Group kinds: ordered containers of file elements.

use pbx_plist::{PlistDictionary, PlistValue};
use pbx_store::{ObjectStore, Reference};

use crate::decode::{DecodeContext, Fields};
use crate::element::FileElement;
use crate::error::ObjectsResult;
use crate::object::PbxObject;
use crate::projection;

/// A `PBXGroup`: a folder (or virtual folder) in the project navigator.
///
/// `children` keeps document order. It is the display order in the IDE and
/// is never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub element: FileElement,
    pub children: Vec<Reference>,
}

impl Group {
    pub const ISA: &'static str = "PBXGroup";
    pub const KEYS: &'static [&'static str] = &["children"];

    /// An empty group with the given attributes.
    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    pub fn decode(fields: &Fields<'_>, ctx: &mut DecodeContext<'_>) -> ObjectsResult<Self> {
        Ok(Self {
            children: fields.references("children", ctx)?,
            element: FileElement::decode(fields)?,
        })
    }

    pub fn project_into(&self, dict: &mut PlistDictionary, objects: &ObjectStore<PbxObject>) {
        self.element.project_into(dict);
        dict.insert("isa".into(), PlistValue::string(Self::ISA));
        dict.insert(
            "children".into(),
            projection::children_value(objects, &self.children),
        );
    }
}

/// A `PBXVariantGroup`: the localized variants of one resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantGroup {
    pub element: FileElement,
    pub children: Vec<Reference>,
}

impl VariantGroup {
    pub const ISA: &'static str = "PBXVariantGroup";
    pub const KEYS: &'static [&'static str] = &["children"];

    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    pub fn decode(fields: &Fields<'_>, ctx: &mut DecodeContext<'_>) -> ObjectsResult<Self> {
        Ok(Self {
            children: fields.references("children", ctx)?,
            element: FileElement::decode(fields)?,
        })
    }

    pub fn project_into(&self, dict: &mut PlistDictionary, objects: &ObjectStore<PbxObject>) {
        self.element.project_into(dict);
        dict.insert("isa".into(), PlistValue::string(Self::ISA));
        dict.insert(
            "children".into(),
            projection::children_value(objects, &self.children),
        );
    }
}

/// An `XCVersionGroup`: a versioned bundle such as a Core Data model, with
/// one child marked as the current version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionGroup {
    pub element: FileElement,
    pub children: Vec<Reference>,
    pub current_version: Option<Reference>,
    pub version_group_type: Option<String>,
}

impl VersionGroup {
    pub const ISA: &'static str = "XCVersionGroup";
    pub const KEYS: &'static [&'static str] = &["children", "currentVersion", "versionGroupType"];

    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            ..Self::default()
        }
    }

    pub fn decode(fields: &Fields<'_>, ctx: &mut DecodeContext<'_>) -> ObjectsResult<Self> {
        Ok(Self {
            children: fields.references("children", ctx)?,
            current_version: fields.reference("currentVersion", ctx)?,
            version_group_type: fields.string("versionGroupType")?,
            element: FileElement::decode(fields)?,
        })
    }

    pub fn project_into(&self, dict: &mut PlistDictionary, objects: &ObjectStore<PbxObject>) {
        self.element.project_into(dict);
        dict.insert("isa".into(), PlistValue::string(Self::ISA));
        dict.insert(
            "children".into(),
            projection::children_value(objects, &self.children),
        );
        if let Some(current) = &self.current_version {
            dict.insert(
                "currentVersion".into(),
                projection::reference_value(objects, current),
            );
        }
        if let Some(kind) = &self.version_group_type {
            dict.insert("versionGroupType".into(), PlistValue::string(kind.as_str()));
        }
    }
}
