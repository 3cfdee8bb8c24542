//! File extension to `lastKnownFileType` lookup.

/// Known extensions and the file type the build tool records for them.
const FILE_TYPES: &[(&str, &str)] = &[
    ("a", "archive.ar"),
    ("app", "wrapper.application"),
    ("appex", "wrapper.app-extension"),
    ("bundle", "wrapper.plug-in"),
    ("c", "sourcecode.c.c"),
    ("cc", "sourcecode.cpp.cpp"),
    ("cpp", "sourcecode.cpp.cpp"),
    ("css", "text.css"),
    ("cxx", "sourcecode.cpp.cpp"),
    ("dylib", "compiled.mach-o.dylib"),
    ("entitlements", "text.plist.entitlements"),
    ("framework", "wrapper.framework"),
    ("gif", "image.gif"),
    ("gpx", "text.xml"),
    ("h", "sourcecode.c.h"),
    ("hh", "sourcecode.cpp.h"),
    ("hpp", "sourcecode.cpp.h"),
    ("html", "text.html"),
    ("intentdefinition", "file.intentdefinition"),
    ("jpeg", "image.jpeg"),
    ("jpg", "image.jpeg"),
    ("js", "sourcecode.javascript"),
    ("json", "text.json"),
    ("m", "sourcecode.c.objc"),
    ("md", "net.daringfireball.markdown"),
    ("metal", "sourcecode.metal"),
    ("mlmodel", "file.mlmodel"),
    ("mm", "sourcecode.cpp.objcpp"),
    ("modulemap", "sourcecode.module-map"),
    ("pch", "sourcecode.c.h"),
    ("pdf", "image.pdf"),
    ("plist", "text.plist.xml"),
    ("png", "image.png"),
    ("rtf", "text.rtf"),
    ("s", "sourcecode.asm"),
    ("sh", "text.script.sh"),
    ("storyboard", "file.storyboard"),
    ("strings", "text.plist.strings"),
    ("stringsdict", "text.plist.stringsdict"),
    ("swift", "sourcecode.swift"),
    ("tbd", "sourcecode.text-based-dylib-definition"),
    ("txt", "text"),
    ("xcassets", "folder.assetcatalog"),
    ("xcconfig", "text.xcconfig"),
    ("xcdatamodel", "wrapper.xcdatamodel"),
    ("xcdatamodeld", "wrapper.xcdatamodeld"),
    ("xcframework", "wrapper.xcframework"),
    ("xcodeproj", "wrapper.pb-project"),
    ("xctest", "wrapper.cfbundle"),
    ("xcworkspace", "wrapper.workspace"),
    ("xib", "file.xib"),
    ("xml", "text.xml"),
    ("yaml", "text.yaml"),
    ("yml", "text.yaml"),
    ("zip", "archive.zip"),
];

/// The file type for `extension` (without the dot), case-insensitive.
pub fn file_type(extension: &str) -> Option<&'static str> {
    let lowered = extension.to_ascii_lowercase();
    FILE_TYPES
        .binary_search_by(|(ext, _)| ext.cmp(&lowered.as_str()))
        .ok()
        .map(|index| FILE_TYPES[index].1)
}
