use pbx_plist::{PlistDictionary, PlistValue};

use crate::decode::Fields;
use crate::element::FileElement;
use crate::error::ObjectsResult;

/// A `PBXFileReference`: a leaf pointing at one file or bundle on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReference {
    pub element: FileElement,
    /// Text encoding, as the numeric `NSStringEncoding` value.
    pub file_encoding: Option<u32>,
    /// File type that overrides detection.
    pub explicit_file_type: Option<String>,
    /// File type detected from the extension.
    pub last_known_file_type: Option<String>,
    /// Line ending style (0 LF, 1 CR, 2 CRLF).
    pub line_ending: Option<u32>,
    pub language_specification_identifier: Option<String>,
    pub xc_language_specification_identifier: Option<String>,
    pub plist_structure_definition_identifier: Option<String>,
}

impl FileReference {
    pub const ISA: &'static str = "PBXFileReference";
    pub const KEYS: &'static [&'static str] = &[
        "fileEncoding",
        "explicitFileType",
        "lastKnownFileType",
        "lineEnding",
        "languageSpecificationIdentifier",
        "xcLanguageSpecificationIdentifier",
        "plistStructureDefinitionIdentifier",
    ];

    pub fn new(element: FileElement) -> Self {
        Self {
            element,
            ..Self::default()
        }
    }

    pub fn decode(fields: &Fields<'_>) -> ObjectsResult<Self> {
        Ok(Self {
            element: FileElement::decode(fields)?,
            file_encoding: fields.uint("fileEncoding")?,
            explicit_file_type: fields.string("explicitFileType")?,
            last_known_file_type: fields.string("lastKnownFileType")?,
            line_ending: fields.uint("lineEnding")?,
            language_specification_identifier: fields.string("languageSpecificationIdentifier")?,
            xc_language_specification_identifier: fields
                .string("xcLanguageSpecificationIdentifier")?,
            plist_structure_definition_identifier: fields
                .string("plistStructureDefinitionIdentifier")?,
        })
    }

    pub fn project_into(&self, dict: &mut PlistDictionary) {
        self.element.project_into(dict);
        dict.insert("isa".into(), PlistValue::string(Self::ISA));
        let numbers = [
            ("fileEncoding", self.file_encoding),
            ("lineEnding", self.line_ending),
        ];
        for (key, value) in numbers {
            if let Some(value) = value {
                dict.insert(key.into(), PlistValue::string(value.to_string()));
            }
        }
        let strings = [
            ("explicitFileType", &self.explicit_file_type),
            ("lastKnownFileType", &self.last_known_file_type),
            (
                "languageSpecificationIdentifier",
                &self.language_specification_identifier,
            ),
            (
                "xcLanguageSpecificationIdentifier",
                &self.xc_language_specification_identifier,
            ),
            (
                "plistStructureDefinitionIdentifier",
                &self.plist_structure_definition_identifier,
            ),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                dict.insert(key.into(), PlistValue::string(value.as_str()));
            }
        }
    }
}
