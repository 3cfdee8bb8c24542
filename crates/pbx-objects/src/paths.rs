//! Lexical path helpers used when resolving and assigning element paths.
//!
//! Paths in a project document always use `/` separators. None of these
//! helpers touch the filesystem except [`exists`] and [`absolute`], which
//! reads the current directory.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and fold `..` into the preceding component.
///
/// `..` at the root of an absolute path is dropped; leading `..` of a
/// relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Express `path` relative to `base`, joined with `/`.
///
/// Both paths are normalized first. Equal paths yield `"."`.
pub fn relative_to(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for component in &base_parts[common..] {
        if !matches!(component, Component::CurDir) {
            parts.push("..".to_string());
        }
    }
    for component in &path_parts[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// The extension of the last component, without the dot.
pub fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// The last component of `path`, if it has one.
pub fn last_component(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// The last `/`-separated segment of a document path string.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

/// Render a path the way the document stores it.
pub fn to_document_string(path: &Path) -> String {
    path.to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}

/// Anchor `path` at the current directory if it is relative, then
/// normalize it.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path).map(|path| normalize(&path))
}

/// Returns `true` if something exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn relative_descendant() {
        assert_eq!(
            relative_to(Path::new("/root/App/Sources/main.swift"), Path::new("/root/App")),
            "Sources/main.swift"
        );
    }

    #[test]
    fn relative_sibling() {
        assert_eq!(
            relative_to(Path::new("/root/Shared/util.swift"), Path::new("/root/App")),
            "../Shared/util.swift"
        );
    }

    #[test]
    fn relative_same_path() {
        assert_eq!(relative_to(Path::new("/root/App"), Path::new("/root/App/")), ".");
    }

    #[test]
    fn absolute_anchors_relative_paths() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("a/./b/..")).unwrap(), normalize(&cwd.join("a")));
        assert_eq!(absolute(Path::new("/x/../y")).unwrap(), PathBuf::from("/y"));
        assert!(absolute(Path::new("")).is_err());
    }

    #[test]
    fn extension_and_last_component() {
        let path = Path::new("/root/App/main.swift");
        assert_eq!(extension(path), Some("swift"));
        assert_eq!(last_component(path), Some("main.swift".to_string()));
        assert_eq!(extension(Path::new("/root/Makefile")), None);
    }

    #[test]
    fn last_segment_of_document_path() {
        assert_eq!(last_segment("Sources/App/main.swift"), "main.swift");
        assert_eq!(last_segment("main.swift"), "main.swift");
        assert_eq!(last_segment("Sources/"), "Sources");
    }

    #[test]
    fn document_string_uses_slashes() {
        assert_eq!(to_document_string(Path::new("/root/App/x.h")), "/root/App/x.h");
        assert_eq!(to_document_string(Path::new("a/b")), "a/b");
    }
}
