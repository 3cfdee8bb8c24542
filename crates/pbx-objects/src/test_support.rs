use pbx_plist::{PlistDictionary, PlistValue};

use crate::project::PbxProj;

/// Parse a JSON object into a plist dictionary.
pub(crate) fn dictionary(json: &str) -> PlistDictionary {
    let value: PlistValue = serde_json::from_str(json).unwrap();
    value.try_dictionary().unwrap().clone()
}

/// Parse a JSON document into a plist value.
pub(crate) fn document(json: &str) -> PlistValue {
    serde_json::from_str(json).unwrap()
}

/// A small application project:
///
/// ```text
/// MAIN
/// ├── SRC "Sources"  (path Sources)
/// │   ├── FR_MAIN    main.swift
/// │   └── FR_APP     App.swift
/// ├── FR_PLIST       Info.plist (SOURCE_ROOT)
/// └── PRODUCTS       "Products" (no path)
///     └── FR_APPEXE  App.app (BUILT_PRODUCTS_DIR)
/// ```
pub(crate) const FIXTURE: &str = r#"{
    "archiveVersion": "1",
    "classes": {},
    "objectVersion": "46",
    "objects": {
        "ROOT": {
            "isa": "PBXProject",
            "mainGroup": "MAIN",
            "productRefGroup": "PRODUCTS",
            "targets": ["TARGET"],
            "compatibilityVersion": "Xcode 3.2",
            "attributes": {"LastUpgradeCheck": "0930"}
        },
        "MAIN": {
            "isa": "PBXGroup",
            "children": ["SRC", "FR_PLIST", "PRODUCTS"],
            "sourceTree": "<group>"
        },
        "SRC": {
            "isa": "PBXGroup",
            "children": ["FR_MAIN", "FR_APP"],
            "path": "Sources",
            "sourceTree": "<group>"
        },
        "PRODUCTS": {
            "isa": "PBXGroup",
            "children": ["FR_APPEXE"],
            "name": "Products",
            "sourceTree": "<group>"
        },
        "FR_MAIN": {
            "isa": "PBXFileReference",
            "lastKnownFileType": "sourcecode.swift",
            "path": "main.swift",
            "sourceTree": "<group>"
        },
        "FR_APP": {
            "isa": "PBXFileReference",
            "fileEncoding": "4",
            "lastKnownFileType": "sourcecode.swift",
            "path": "App.swift",
            "sourceTree": "<group>"
        },
        "FR_PLIST": {
            "isa": "PBXFileReference",
            "lastKnownFileType": "text.plist.xml",
            "path": "Info.plist",
            "sourceTree": "SOURCE_ROOT"
        },
        "FR_APPEXE": {
            "isa": "PBXFileReference",
            "explicitFileType": "wrapper.application",
            "includeInIndex": "0",
            "path": "App.app",
            "sourceTree": "BUILT_PRODUCTS_DIR"
        },
        "TARGET": {
            "isa": "PBXNativeTarget",
            "buildPhases": [],
            "name": "App",
            "productName": "App",
            "productReference": "FR_APPEXE",
            "productType": "com.apple.product-type.application"
        }
    },
    "rootObject": "ROOT"
}"#;

/// The fixture, decoded.
pub(crate) fn fixture() -> PbxProj {
    PbxProj::decode(&document(FIXTURE)).unwrap()
}
