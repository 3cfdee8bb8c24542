//! OpenStep-style plist text writer.
//!
//! The writer knows how to quote scalars, attach `/* comment */` annotations,
//! and lay out arrays and dictionaries either across lines (tab indented) or
//! on a single line. Document-level structure (headers, object sections) is
//! assembled by the caller on top of these primitives.

use std::borrow::Cow;

use crate::value::{CommentedString, PlistDictionary, PlistValue};

/// How a compound value is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One entry per line, indented with tabs.
    MultiLine,
    /// Everything on the current line.
    SingleLine,
}

/// Accumulates plist text.
#[derive(Debug, Default)]
pub struct PlistWriter {
    out: String,
    depth: usize,
}

impl PlistWriter {
    /// Create an empty writer at depth zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the writer and return the text.
    pub fn into_string(self) -> String {
        self.out
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Increase the indentation depth by one.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the indentation depth by one.
    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Append raw text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Append a line break.
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Append one tab per depth level.
    pub fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }

    /// Append a scalar, quoted if needed, followed by its comment.
    pub fn write_string(&mut self, value: &CommentedString) {
        self.out.push_str(&quote(&value.string));
        if let Some(comment) = &value.comment {
            self.out.push_str(" /* ");
            self.out.push_str(&comment.replace("*/", "* /"));
            self.out.push_str(" */");
        }
    }

    /// Append a value using `layout` for compound values.
    pub fn write_value(&mut self, value: &PlistValue, layout: Layout) {
        match value {
            PlistValue::String(s) => self.write_string(s),
            PlistValue::Array(items) => self.write_array(items, layout),
            PlistValue::Dictionary(dict) => self.write_dictionary(dict, layout),
        }
    }

    /// Append `key = value;` and, in multi-line layout, a line break.
    pub fn write_entry(&mut self, key: &CommentedString, value: &PlistValue, layout: Layout) {
        match layout {
            Layout::MultiLine => {
                self.write_indent();
                self.write_string(key);
                self.out.push_str(" = ");
                self.write_value(value, layout);
                self.out.push_str(";\n");
            }
            Layout::SingleLine => {
                self.write_string(key);
                self.out.push_str(" = ");
                self.write_value(value, layout);
                self.out.push_str("; ");
            }
        }
    }

    fn write_array(&mut self, items: &[PlistValue], layout: Layout) {
        match layout {
            Layout::MultiLine => {
                self.out.push_str("(\n");
                self.indent();
                for item in items {
                    self.write_indent();
                    self.write_value(item, layout);
                    self.out.push_str(",\n");
                }
                self.outdent();
                self.write_indent();
                self.out.push(')');
            }
            Layout::SingleLine => {
                self.out.push('(');
                for item in items {
                    self.write_value(item, layout);
                    self.out.push_str(", ");
                }
                self.out.push(')');
            }
        }
    }

    fn write_dictionary(&mut self, dict: &PlistDictionary, layout: Layout) {
        match layout {
            Layout::MultiLine => {
                self.out.push_str("{\n");
                self.indent();
                for (key, value) in dict {
                    self.write_entry(key, value, layout);
                }
                self.outdent();
                self.write_indent();
                self.out.push('}');
            }
            Layout::SingleLine => {
                self.out.push('{');
                for (key, value) in dict {
                    self.write_entry(key, value, layout);
                }
                self.out.push('}');
            }
        }
    }
}

/// Quote and escape `text` unless it can be written bare.
///
/// A scalar is written bare when it is non-empty, made only of ASCII letters,
/// digits, `_`, `$`, `.` and `/`, and contains neither `___` nor `//`.
pub fn quote(text: &str) -> Cow<'_, str> {
    let bare = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'))
        && !text.contains("___")
        && !text.contains("//");
    if bare {
        return Cow::Borrowed(text);
    }
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}
