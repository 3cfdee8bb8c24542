//! Renders a whole project document as OpenStep plist text.
//!
//! The layout follows what the build tool itself writes: a UTF-8 marker
//! line, objects grouped into `/* Begin <isa> section */` blocks in `isa`
//! order, objects sorted by identifier inside each block, and some kinds
//! written on a single line.

use std::collections::BTreeMap;

use pbx_plist::{CommentedString, Layout, PlistValue, PlistWriter};
use pbx_store::StoreObject;
use tracing::debug;

use crate::config::EncoderConfig;
use crate::project::PbxProj;
use crate::projection;

const HEADER: &str = "// !$*UTF8*$!";

/// Document text renderer.
#[derive(Clone, Debug, Default)]
pub struct ProjectEncoder {
    config: EncoderConfig,
}

impl ProjectEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Render `proj`. Rendering the same document twice gives identical
    /// text.
    pub fn encode(&self, proj: &PbxProj) -> String {
        let mut sections: BTreeMap<&str, Vec<(CommentedString, PlistValue)>> = BTreeMap::new();
        for (id, object) in proj.objects().iter() {
            sections
                .entry(object.isa())
                .or_default()
                .push(object.projection(proj.objects(), id));
        }

        let mut w = PlistWriter::new();
        w.raw(HEADER);
        w.newline();
        w.raw("{");
        w.newline();
        w.indent();

        self.entry(&mut w, "archiveVersion", &PlistValue::string(proj.archive_version.as_str()));
        self.entry(&mut w, "classes", &PlistValue::Dictionary(proj.classes.clone()));
        self.entry(&mut w, "objectVersion", &PlistValue::string(proj.object_version.as_str()));

        w.write_indent();
        w.raw("objects = {");
        w.newline();
        w.indent();
        for (isa, objects) in &sections {
            let layout = if self.config.is_inline(isa) {
                Layout::SingleLine
            } else {
                Layout::MultiLine
            };
            w.newline();
            w.raw(&format!("/* Begin {isa} section */"));
            w.newline();
            for (key, value) in objects {
                self.object(&mut w, key, value, layout);
            }
            w.raw(&format!("/* End {isa} section */"));
            w.newline();
        }
        w.outdent();
        w.write_indent();
        w.raw("};");
        w.newline();

        if let Some(root) = &proj.root_object {
            let value = projection::reference_value(proj.objects(), root);
            self.entry(&mut w, "rootObject", &value);
        }

        w.outdent();
        w.raw("}");
        w.newline();

        debug!(
            objects = proj.objects().len(),
            sections = sections.len(),
            "encoded project"
        );
        w.into_string()
    }

    fn entry(&self, w: &mut PlistWriter, key: &str, value: &PlistValue) {
        w.write_entry(&CommentedString::new(key), &self.comments(value), Layout::MultiLine);
    }

    fn object(&self, w: &mut PlistWriter, key: &CommentedString, value: &PlistValue, layout: Layout) {
        let key = if self.config.comments {
            key.clone()
        } else {
            CommentedString::new(key.as_str())
        };
        let value = self.comments(value);
        match layout {
            Layout::MultiLine => w.write_entry(&key, &value, layout),
            Layout::SingleLine => {
                w.write_indent();
                w.write_string(&key);
                w.raw(" = ");
                w.write_value(&value, layout);
                w.raw(";");
                w.newline();
            }
        }
    }

    fn comments(&self, value: &PlistValue) -> PlistValue {
        if self.config.comments {
            value.clone()
        } else {
            strip_comments(value)
        }
    }
}

fn strip_comments(value: &PlistValue) -> PlistValue {
    match value {
        PlistValue::String(s) => PlistValue::string(s.as_str()),
        PlistValue::Array(items) => PlistValue::Array(items.iter().map(strip_comments).collect()),
        PlistValue::Dictionary(dict) => PlistValue::Dictionary(
            dict.iter()
                .map(|(key, value)| (CommentedString::new(key.as_str()), strip_comments(value)))
                .collect(),
        ),
    }
}
