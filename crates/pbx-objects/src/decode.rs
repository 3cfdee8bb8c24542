//! Explicit decode context and typed field access.
//!
//! Decoding never reaches for ambient state: every decode step receives the
//! document's store and reference repository through a [`DecodeContext`]
//! passed by reference, which keeps decoding reentrant and testable on a
//! single object.

use pbx_plist::{PlistDictionary, PlistValue};
use pbx_store::{ObjectStore, Reference, ReferenceRepository, StoreResult};
use pbx_types::Identifier;

use crate::error::{ObjectsError, ObjectsResult};
use crate::object::PbxObject;

/// The document state a decode step may consult.
pub struct DecodeContext<'a> {
    /// Objects materialized so far. Read-only during a decode step.
    pub objects: &'a ObjectStore<PbxObject>,
    /// Interning table that turns raw tokens into references.
    pub references: &'a mut ReferenceRepository,
}

impl<'a> DecodeContext<'a> {
    /// Bundle a store and its repository.
    pub fn new(objects: &'a ObjectStore<PbxObject>, references: &'a mut ReferenceRepository) -> Self {
        Self {
            objects,
            references,
        }
    }

    /// Get or create the reference for `raw`.
    pub fn reference(&mut self, raw: &str) -> StoreResult<Reference> {
        self.references.get_or_create(raw, self.objects)
    }
}

/// Typed reader over one object's dictionary.
///
/// Absent keys read as `None` (or an empty list). A present key of the wrong
/// shape is a [`ObjectsError::MalformedObject`] naming the object.
#[derive(Clone, Copy)]
pub struct Fields<'a> {
    id: &'a Identifier,
    dict: &'a PlistDictionary,
}

impl<'a> Fields<'a> {
    /// Read the dictionary of object `id`.
    pub fn new(id: &'a Identifier, dict: &'a PlistDictionary) -> Self {
        Self { id, dict }
    }

    /// The identifier of the object being read.
    pub fn id(&self) -> &'a Identifier {
        self.id
    }

    /// The raw dictionary.
    pub fn dictionary(&self) -> &'a PlistDictionary {
        self.dict
    }

    /// Build a malformed-object error for this object.
    pub fn malformed(&self, reason: impl Into<String>) -> ObjectsError {
        ObjectsError::MalformedObject {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }

    /// The required `isa` discriminator.
    pub fn isa(&self) -> ObjectsResult<&'a str> {
        match self.dict.get("isa") {
            Some(value) => value
                .as_str()
                .ok_or_else(|| self.malformed(format!("isa: expected string, found {}", value.shape()))),
            None => Err(self.malformed("missing isa")),
        }
    }

    /// An optional string field.
    pub fn string(&self, key: &str) -> ObjectsResult<Option<String>> {
        self.str(key).map(|value| value.map(str::to_string))
    }

    /// An optional string field, borrowed.
    pub fn str(&self, key: &str) -> ObjectsResult<Option<&'a str>> {
        match self.dict.get(key) {
            None => Ok(None),
            Some(PlistValue::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.malformed(format!(
                "{key}: expected string, found {}",
                other.shape()
            ))),
        }
    }

    /// An optional boolean field, written as `0`/`1` (`YES`/`NO` accepted).
    pub fn bool(&self, key: &str) -> ObjectsResult<Option<bool>> {
        match self.str(key)? {
            None => Ok(None),
            Some("1") | Some("YES") | Some("true") => Ok(Some(true)),
            Some("0") | Some("NO") | Some("false") => Ok(Some(false)),
            Some(other) => Err(self.malformed(format!("{key}: expected 0 or 1, found {other:?}"))),
        }
    }

    /// An optional unsigned integer field.
    pub fn uint(&self, key: &str) -> ObjectsResult<Option<u32>> {
        match self.str(key)? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| self.malformed(format!("{key}: expected unsigned integer, found {raw:?}"))),
        }
    }

    /// Keys other than `isa` that are not in any of `known`, in document
    /// order.
    pub fn unread_keys(&self, known: &[&[&str]]) -> Vec<&'a str> {
        self.dict
            .keys()
            .map(|key| key.as_str())
            .filter(|key| *key != "isa" && !known.iter().any(|keys| keys.contains(key)))
            .collect()
    }

    /// An optional reference-valued field.
    pub fn reference(&self, key: &str, ctx: &mut DecodeContext<'_>) -> ObjectsResult<Option<Reference>> {
        match self.str(key)? {
            None => Ok(None),
            Some(raw) => ctx
                .reference(raw)
                .map(Some)
                .map_err(|e| self.malformed(format!("{key}: {e}"))),
        }
    }

    /// An ordered list of references, in document order. Absent reads as
    /// empty.
    pub fn references(&self, key: &str, ctx: &mut DecodeContext<'_>) -> ObjectsResult<Vec<Reference>> {
        let items = match self.dict.get(key) {
            None => return Ok(Vec::new()),
            Some(PlistValue::Array(items)) => items,
            Some(other) => {
                return Err(self.malformed(format!(
                    "{key}: expected array, found {}",
                    other.shape()
                )))
            }
        };
        items
            .iter()
            .map(|item| {
                let raw = item.as_str().ok_or_else(|| {
                    self.malformed(format!("{key}: expected string element, found {}", item.shape()))
                })?;
                ctx.reference(raw)
                    .map_err(|e| self.malformed(format!("{key}: {e}")))
            })
            .collect()
    }
}
