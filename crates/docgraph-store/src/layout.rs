//! On-disk layout of a directory-format store.
//!
//! Relative to the bound root:
//! - `checksums` -- text file, one `<filename> <checksum>` record per line
//! - `proxy_types` -- serialized mapping of unresolved references to kind names
//! - `objects/root.dat` -- the serialized graph root
//! - `objects/**/*.dat` -- one blob per remaining object

use std::path::{Path, PathBuf};

use docgraph_types::ObjectKey;

/// File name of the checksum table.
pub const CHECKSUMS_FILE: &str = "checksums";

/// File name of the proxy-type table.
pub const PROXY_TYPES_FILE: &str = "proxy_types";

/// Directory holding serialized objects.
pub const OBJECTS_DIR: &str = "objects";

/// Extension of serialized object files.
pub const OBJECT_EXTENSION: &str = "dat";

/// Extension a backing store must carry before an unforced destroy will
/// touch it.
pub const STORE_EXTENSION: &str = "docgraph";

/// Path of the checksum table.
pub fn checksums_path(root: &Path) -> PathBuf {
    root.join(CHECKSUMS_FILE)
}

/// Path of the proxy-type table.
pub fn proxy_types_path(root: &Path) -> PathBuf {
    root.join(PROXY_TYPES_FILE)
}

/// Path of the objects directory.
pub fn objects_path(root: &Path) -> PathBuf {
    root.join(OBJECTS_DIR)
}

/// Path of the serialized graph root.
pub fn root_object_path(root: &Path) -> PathBuf {
    object_path(root, &ObjectKey::root())
}

/// Map a key to its object file: `a::b::c` becomes `objects/a/b/c.dat`.
///
/// The extension is appended, not substituted, so a name containing a dot
/// keeps it.
pub fn object_path(root: &Path, key: &ObjectKey) -> PathBuf {
    let mut path = objects_path(root);
    let mut segments = key.segments().peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.{OBJECT_EXTENSION}"));
        }
    }
    path
}

/// Teardown guard: does the path carry the recognized store extension?
pub fn has_store_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == STORE_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auxiliary_paths() {
        let root = Path::new("proj.docgraph");
        assert_eq!(checksums_path(root), root.join("checksums"));
        assert_eq!(proxy_types_path(root), root.join("proxy_types"));
        assert_eq!(objects_path(root), root.join("objects"));
    }

    #[test]
    fn root_object_lives_under_objects() {
        let root = Path::new("proj.docgraph");
        assert_eq!(
            root_object_path(root),
            root.join("objects").join("root.dat")
        );
    }

    #[test]
    fn nested_key_maps_to_nested_path() {
        let root = Path::new("proj.docgraph");
        let key = ObjectKey::new("core::store::DocStore");
        assert_eq!(
            object_path(root, &key),
            root.join("objects")
                .join("core")
                .join("store")
                .join("DocStore.dat")
        );
    }

    #[test]
    fn single_segment_key_path() {
        let root = Path::new("proj.docgraph");
        let key = ObjectKey::new("toplevel");
        assert_eq!(
            object_path(root, &key),
            root.join("objects").join("toplevel.dat")
        );
    }

    #[test]
    fn dotted_name_keeps_its_dot() {
        let root = Path::new("proj.docgraph");
        let key = ObjectKey::new("api::v1.0");
        assert_eq!(
            object_path(root, &key),
            root.join("objects").join("api").join("v1.0.dat")
        );
    }

    #[test]
    fn store_extension_guard() {
        assert!(has_store_extension(Path::new("proj.docgraph")));
        assert!(has_store_extension(Path::new("/tmp/a/b.docgraph")));
        assert!(!has_store_extension(Path::new("proj")));
        assert!(!has_store_extension(Path::new("proj.backup")));
        assert!(!has_store_extension(Path::new("docgraph")));
    }
}
