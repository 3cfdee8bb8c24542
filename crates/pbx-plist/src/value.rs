//! The plist value model.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PlistError, PlistResult};

/// A string scalar with an optional advisory comment.
///
/// Equality, hashing and ordering only look at `string`. Two commented
/// strings with the same text are the same dictionary key even if their
/// comments differ.
#[derive(Clone, Debug, Default)]
pub struct CommentedString {
    /// The scalar text.
    pub string: String,
    /// Human-readable annotation, written as `/* comment */`.
    pub comment: Option<String>,
}

impl CommentedString {
    /// A string without a comment.
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            comment: None,
        }
    }

    /// A string annotated with `comment`, if any.
    pub fn with_comment(string: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            string: string.into(),
            comment,
        }
    }

    /// The scalar text.
    pub fn as_str(&self) -> &str {
        &self.string
    }
}

impl PartialEq for CommentedString {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for CommentedString {}

impl Hash for CommentedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl PartialOrd for CommentedString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommentedString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string.cmp(&other.string)
    }
}

impl Borrow<str> for CommentedString {
    fn borrow(&self) -> &str {
        &self.string
    }
}

impl fmt::Display for CommentedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl From<&str> for CommentedString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CommentedString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// An insertion-ordered plist dictionary.
pub type PlistDictionary = IndexMap<CommentedString, PlistValue>;

/// A node of a generic plist tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlistValue {
    /// A string scalar, possibly commented.
    String(CommentedString),
    /// An ordered list of values.
    Array(Vec<PlistValue>),
    /// An ordered key/value mapping.
    Dictionary(PlistDictionary),
}

impl PlistValue {
    /// A string value without a comment.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(CommentedString::new(value))
    }

    /// A string value annotated with `comment`, if any.
    pub fn commented(value: impl Into<String>, comment: Option<String>) -> Self {
        Self::String(CommentedString::with_comment(value, comment))
    }

    /// Short name of this value's shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
        }
    }

    /// The string text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The comment attached to a string, if any.
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::String(s) => s.comment.as_deref(),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&PlistDictionary> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up `key` when this is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }

    /// The string text, or a shape error.
    pub fn try_str(&self) -> PlistResult<&str> {
        self.as_str().ok_or(PlistError::UnexpectedShape {
            expected: "string",
            found: self.shape(),
        })
    }

    /// The elements, or a shape error.
    pub fn try_array(&self) -> PlistResult<&[PlistValue]> {
        self.as_array().ok_or(PlistError::UnexpectedShape {
            expected: "array",
            found: self.shape(),
        })
    }

    /// The entries, or a shape error.
    pub fn try_dictionary(&self) -> PlistResult<&PlistDictionary> {
        self.as_dictionary().ok_or(PlistError::UnexpectedShape {
            expected: "dictionary",
            found: self.shape(),
        })
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(value: Vec<PlistValue>) -> Self {
        Self::Array(value)
    }
}

impl From<PlistDictionary> for PlistValue {
    fn from(value: PlistDictionary) -> Self {
        Self::Dictionary(value)
    }
}

// ---------------------------------------------------------------------------
// serde bridge
// ---------------------------------------------------------------------------

impl Serialize for PlistValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(s) => serializer.serialize_str(&s.string),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Dictionary(dict) => {
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (key, value) in dict {
                    map.serialize_entry(&key.string, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PlistValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PlistValueVisitor)
    }
}

/// Accepts JSON-shaped trees. The project format has only string scalars,
/// so numbers and booleans are kept in their textual form.
struct PlistValueVisitor;

impl<'de> Visitor<'de> for PlistValueVisitor {
    type Value = PlistValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, array, or dictionary")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(v))
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(if v { "1" } else { "0" }))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PlistValue::string(v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PlistValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut dict = PlistDictionary::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, PlistValue>()? {
            dict.insert(CommentedString::new(key), value);
        }
        Ok(PlistValue::Dictionary(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn comments_do_not_affect_equality() {
        let a = CommentedString::with_comment("ABC", Some("main.swift".into()));
        let b = CommentedString::new("ABC");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn dictionary_lookup_by_str() {
        let mut dict = PlistDictionary::new();
        dict.insert("isa".into(), PlistValue::string("PBXGroup"));
        let value = PlistValue::Dictionary(dict);
        assert_eq!(value.get("isa").and_then(PlistValue::as_str), Some("PBXGroup"));
        assert!(value.get("children").is_none());
    }

    #[test]
    fn dictionary_preserves_insertion_order() {
        let mut dict = PlistDictionary::new();
        dict.insert("z".into(), PlistValue::string("1"));
        dict.insert("a".into(), PlistValue::string("2"));
        let keys: Vec<&str> = dict.keys().map(CommentedString::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn try_accessors_report_shape() {
        let value = PlistValue::Array(vec![]);
        assert_eq!(
            value.try_str(),
            Err(PlistError::UnexpectedShape {
                expected: "string",
                found: "array",
            })
        );
        assert!(value.try_array().is_ok());
        assert!(value.try_dictionary().is_err());
    }

    #[test]
    fn comment_accessor() {
        let value = PlistValue::commented("ID", Some("Sources".into()));
        assert_eq!(value.comment(), Some("Sources"));
        assert_eq!(PlistValue::string("ID").comment(), None);
    }

    #[test]
    fn deserialize_json_tree() {
        let json = r#"{"isa":"PBXGroup","children":["A","B","C"],"indentWidth":4,"usesTabs":true}"#;
        let value: PlistValue = serde_json::from_str(json).unwrap();
        let children: Vec<&str> = value
            .get("children")
            .and_then(PlistValue::as_array)
            .unwrap()
            .iter()
            .filter_map(PlistValue::as_str)
            .collect();
        assert_eq!(children, vec!["A", "B", "C"]);
        assert_eq!(value.get("indentWidth").and_then(PlistValue::as_str), Some("4"));
        assert_eq!(value.get("usesTabs").and_then(PlistValue::as_str), Some("1"));
    }

    #[test]
    fn deserialize_rejects_null() {
        assert!(serde_json::from_str::<PlistValue>("null").is_err());
    }

    #[test]
    fn serialize_drops_comments() {
        let mut dict = PlistDictionary::new();
        dict.insert(
            CommentedString::with_comment("ID", Some("name".into())),
            PlistValue::Array(vec![PlistValue::commented("X", Some("x".into()))]),
        );
        let json = serde_json::to_string(&PlistValue::Dictionary(dict)).unwrap();
        assert_eq!(json, r#"{"ID":["X"]}"#);
    }

    proptest::proptest! {
        #[test]
        fn array_order_survives_json(items in proptest::collection::vec("[A-Z0-9]{1,24}", 0..16)) {
            let value = PlistValue::Array(items.iter().map(|s| PlistValue::string(s.as_str())).collect());
            let json = serde_json::to_string(&value).unwrap();
            let back: PlistValue = serde_json::from_str(&json).unwrap();
            proptest::prop_assert_eq!(back, value);
        }
    }
}
