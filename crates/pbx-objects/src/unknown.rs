use pbx_plist::{PlistDictionary, PlistValue};
use pbx_store::ObjectStore;

use crate::decode::Fields;
use crate::error::ObjectsResult;
use crate::object::PbxObject;
use crate::projection;

/// Any object kind without a typed model (targets, build phases,
/// configurations, the project object itself).
///
/// The dictionary is carried through untouched so a document survives a
/// decode/encode cycle even where only groups and files are understood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownObject {
    pub isa: String,
    /// Every key except `isa`, in document order.
    pub fields: PlistDictionary,
}

impl UnknownObject {
    /// The `isa` of the root project object.
    pub const PROJECT_ISA: &'static str = "PBXProject";

    pub fn new(isa: impl Into<String>, fields: PlistDictionary) -> Self {
        Self {
            isa: isa.into(),
            fields,
        }
    }

    pub fn decode(fields: &Fields<'_>) -> ObjectsResult<Self> {
        let isa = fields.isa()?;
        let mut rest = fields.dictionary().clone();
        rest.shift_remove("isa");
        Ok(Self::new(isa, rest))
    }

    /// A string field.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(PlistValue::as_str)
    }

    /// `Project object` for the root project, else the `name` field, else
    /// the `isa`.
    pub fn display_label(&self) -> &str {
        if self.isa == Self::PROJECT_ISA {
            return "Project object";
        }
        self.string("name").unwrap_or(&self.isa)
    }

    pub fn project_into(&self, dict: &mut PlistDictionary, objects: &ObjectStore<PbxObject>) {
        dict.insert("isa".into(), PlistValue::string(self.isa.as_str()));
        for (key, value) in &self.fields {
            dict.insert(key.clone(), projection::annotate(objects, key.as_str(), value));
        }
    }
}
