//! Helpers shared by every object's plist projection.
//!
//! Reference-valued fields are written as the raw token, annotated with a
//! comment computed at projection time by resolving the reference. A
//! reference that does not resolve is written bare. Comments are advisory,
//! so a failed resolution is never an error here.

use pbx_plist::{CommentedString, PlistDictionary, PlistValue};
use pbx_store::{ObjectStore, Reference};

use crate::object::PbxObject;

/// The display label of the object `reference` points at, if it resolves.
pub fn label(objects: &ObjectStore<PbxObject>, reference: &Reference) -> Option<String> {
    objects
        .object(reference)
        .ok()
        .and_then(PbxObject::display_label)
        .map(str::to_string)
}

/// The label used next to a group child: the file name for file elements,
/// the display label otherwise.
pub fn child_label(objects: &ObjectStore<PbxObject>, reference: &Reference) -> Option<String> {
    let object = objects.object(reference).ok()?;
    let label = match object.file_element() {
        Some(element) => element.file_name(),
        None => object.display_label(),
    };
    label.map(str::to_string)
}

/// A reference token annotated with its target's display label.
pub fn reference_value(objects: &ObjectStore<PbxObject>, reference: &Reference) -> PlistValue {
    PlistValue::commented(reference.value(), label(objects, reference))
}

/// An ordered `children` array, each token annotated with the child's name.
pub fn children_value(objects: &ObjectStore<PbxObject>, children: &[Reference]) -> PlistValue {
    PlistValue::Array(
        children
            .iter()
            .map(|child| PlistValue::commented(child.value(), child_label(objects, child)))
            .collect(),
    )
}

/// Reorder `dict` the way the build tool writes objects: `isa` first, then
/// the remaining keys in ascending order.
pub fn canonical(dict: PlistDictionary) -> PlistDictionary {
    let mut entries: Vec<(CommentedString, PlistValue)> = dict.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        (a.as_str() != "isa")
            .cmp(&(b.as_str() != "isa"))
            .then_with(|| a.cmp(b))
    });
    entries.into_iter().collect()
}

/// Keys whose identifier values Xcode writes without a comment.
const BARE_KEYS: &[&str] = &["remoteGlobalIDString"];

/// Annotate the top-level field `key` of an opaque object.
///
/// Strings, and strings directly inside arrays, that name a stored object
/// get that object's label. Nested dictionaries and [`BARE_KEYS`] are left
/// untouched.
pub fn annotate(objects: &ObjectStore<PbxObject>, key: &str, value: &PlistValue) -> PlistValue {
    if BARE_KEYS.contains(&key) {
        return value.clone();
    }
    match value {
        PlistValue::String(s) => PlistValue::String(annotate_token(objects, s)),
        PlistValue::Array(items) => PlistValue::Array(
            items
                .iter()
                .map(|item| match item {
                    PlistValue::String(s) => PlistValue::String(annotate_token(objects, s)),
                    other => other.clone(),
                })
                .collect(),
        ),
        PlistValue::Dictionary(_) => value.clone(),
    }
}

fn annotate_token(objects: &ObjectStore<PbxObject>, token: &CommentedString) -> CommentedString {
    let comment = objects
        .get(token.as_str())
        .and_then(PbxObject::display_label)
        .map(str::to_string);
    CommentedString::with_comment(token.as_str(), comment)
}
