//! The attribute record shared by every file element kind.

use pbx_plist::{PlistDictionary, PlistValue};

use crate::decode::Fields;
use crate::error::ObjectsResult;
use crate::paths;
use crate::source_tree::SourceTree;

/// Attributes common to groups and file references.
///
/// Every attribute is optional. Unset attributes are omitted from the
/// projected dictionary, mirroring how decoding treats absent keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileElement {
    /// Base the `path` is interpreted against.
    pub source_tree: Option<SourceTree>,
    /// Path relative to `source_tree`.
    pub path: Option<String>,
    /// Display name, when different from the last path component.
    pub name: Option<String>,
    /// Whether the IDE indexes this element.
    pub include_in_index: Option<bool>,
    /// Whether the IDE indents with tabs.
    pub uses_tabs: Option<bool>,
    /// Number of columns per indentation level.
    pub indent_width: Option<u32>,
    /// Visual width of a tab character.
    pub tab_width: Option<u32>,
    /// Whether the IDE wraps long lines.
    pub wraps_lines: Option<bool>,
}

impl FileElement {
    /// Keys read by [`FileElement::decode`].
    pub const KEYS: &'static [&'static str] = &[
        "sourceTree",
        "path",
        "name",
        "includeInIndex",
        "usesTabs",
        "indentWidth",
        "tabWidth",
        "wrapsLines",
    ];

    /// An element with only a source tree, name and path.
    pub fn new(source_tree: SourceTree, name: Option<String>, path: Option<String>) -> Self {
        Self {
            source_tree: Some(source_tree),
            name,
            path,
            ..Self::default()
        }
    }

    /// Read the shared attributes.
    pub fn decode(fields: &Fields<'_>) -> ObjectsResult<Self> {
        Ok(Self {
            source_tree: fields.str("sourceTree")?.map(SourceTree::parse),
            path: fields.string("path")?,
            name: fields.string("name")?,
            include_in_index: fields.bool("includeInIndex")?,
            uses_tabs: fields.bool("usesTabs")?,
            indent_width: fields.uint("indentWidth")?,
            tab_width: fields.uint("tabWidth")?,
            wraps_lines: fields.bool("wrapsLines")?,
        })
    }

    /// Write the set attributes into `dict`.
    pub fn project_into(&self, dict: &mut PlistDictionary) {
        if let Some(tree) = &self.source_tree {
            dict.insert("sourceTree".into(), PlistValue::string(tree.as_str()));
        }
        if let Some(path) = &self.path {
            dict.insert("path".into(), PlistValue::string(path.as_str()));
        }
        if let Some(name) = &self.name {
            dict.insert("name".into(), PlistValue::string(name.as_str()));
        }
        if let Some(flag) = self.include_in_index {
            dict.insert("includeInIndex".into(), bool_value(flag));
        }
        if let Some(flag) = self.uses_tabs {
            dict.insert("usesTabs".into(), bool_value(flag));
        }
        if let Some(width) = self.indent_width {
            dict.insert("indentWidth".into(), PlistValue::string(width.to_string()));
        }
        if let Some(width) = self.tab_width {
            dict.insert("tabWidth".into(), PlistValue::string(width.to_string()));
        }
        if let Some(flag) = self.wraps_lines {
            dict.insert("wrapsLines".into(), bool_value(flag));
        }
    }

    /// Name if set, else path.
    pub fn display_label(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }

    /// Name if set, else the last component of the path.
    pub fn file_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| self.path.as_deref().map(paths::last_segment))
    }
}

fn bool_value(flag: bool) -> PlistValue {
    PlistValue::string(if flag { "1" } else { "0" })
}
