//! Bincode-over-directory implementation of the [`Serializer`] seam.

use std::fs;
use std::path::{Path, PathBuf};

use docgraph_types::{DocObject, ObjectHeader, ObjectKey};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::layout;
use crate::serializer::Serializer;

/// Decode one bincode payload from a file.
pub(crate) fn decode_file<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let data = fs::read(path)?;
    bincode::deserialize(&data).map_err(|e| StoreError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serializer reading bincode object blobs from a directory-format store.
#[derive(Debug)]
pub struct DiskSerializer {
    root: PathBuf,
}

impl DiskSerializer {
    /// Bind to the root of a directory-format store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The bound store root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Serializer for DiskSerializer {
    fn deserialize_key(&self, key: &ObjectKey) -> StoreResult<Option<DocObject>> {
        let path = layout::object_path(&self.root, key);
        if !path.is_file() {
            return Ok(None);
        }
        decode_file(&path).map(Some)
    }

    fn deserialize_path(&self, path: &Path, lazy: bool) -> StoreResult<DocObject> {
        if lazy {
            // The header is a strict prefix of the serialized object; the
            // body bytes are left unread.
            let header: ObjectHeader = decode_file(path)?;
            Ok(DocObject::from_header(header))
        } else {
            decode_file(path)
        }
    }

    fn all_object_paths(&self) -> StoreResult<Vec<PathBuf>> {
        let objects = layout::objects_path(&self.root);
        if !objects.is_dir() {
            return Ok(Vec::new());
        }
        let root_object = layout::root_object_path(&self.root);

        let mut paths = Vec::new();
        for entry in WalkDir::new(&objects) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            // The graph root is auxiliary metadata, loaded eagerly at bind
            // time, and is not part of the enumerable set.
            if path == root_object {
                continue;
            }
            let is_object = path
                .extension()
                .map(|ext| ext == layout::OBJECT_EXTENSION)
                .unwrap_or(false);
            if is_object {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_types::ObjectKind;
    use tempfile::TempDir;

    fn make_object(key: &str, docstring: &str) -> DocObject {
        DocObject::new(key, ObjectKind::Class).with_docstring(docstring)
    }

    fn write_object(root: &Path, obj: &DocObject) -> PathBuf {
        let path = layout::object_path(root, &obj.key);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bincode::serialize(obj).unwrap()).unwrap();
        path
    }

    fn make_store_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn deserialize_key_misses_on_absent_blob() {
        let dir = make_store_dir();
        let serializer = DiskSerializer::new(dir.path());
        let found = serializer
            .deserialize_key(&ObjectKey::new("nope"))
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn deserialize_key_reads_full_object() {
        let dir = make_store_dir();
        let obj = make_object("core::Parser", "Parses source files.");
        write_object(dir.path(), &obj);

        let serializer = DiskSerializer::new(dir.path());
        let found = serializer
            .deserialize_key(&ObjectKey::new("core::Parser"))
            .unwrap()
            .unwrap();
        assert_eq!(found, obj);
    }

    #[test]
    fn deserialize_key_propagates_corruption() {
        let dir = make_store_dir();
        let path = layout::object_path(dir.path(), &ObjectKey::new("bad"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();

        let serializer = DiskSerializer::new(dir.path());
        let err = serializer
            .deserialize_key(&ObjectKey::new("bad"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn deserialize_path_full_mode() {
        let dir = make_store_dir();
        let obj = make_object("core::Parser", "Parses source files.");
        let path = write_object(dir.path(), &obj);

        let serializer = DiskSerializer::new(dir.path());
        let found = serializer.deserialize_path(&path, false).unwrap();
        assert_eq!(found, obj);
    }

    #[test]
    fn deserialize_path_lazy_mode_builds_proxy() {
        let dir = make_store_dir();
        let obj = make_object("core::Parser", "Parses source files.");
        let path = write_object(dir.path(), &obj);

        let serializer = DiskSerializer::new(dir.path());
        let proxy = serializer.deserialize_path(&path, true).unwrap();
        assert_eq!(proxy.key, obj.key);
        assert_eq!(proxy.kind, obj.kind);
        assert!(proxy.docstring.is_empty());
    }

    #[test]
    fn deserialize_path_missing_file_is_fatal() {
        let dir = make_store_dir();
        let serializer = DiskSerializer::new(dir.path());
        let missing = dir.path().join("objects").join("gone.dat");
        assert!(serializer.deserialize_path(&missing, true).is_err());
    }

    #[test]
    fn enumeration_without_objects_dir_is_empty() {
        let dir = make_store_dir();
        let serializer = DiskSerializer::new(dir.path());
        assert!(serializer.all_object_paths().unwrap().is_empty());
    }

    #[test]
    fn enumeration_excludes_root_and_foreign_files() {
        let dir = make_store_dir();
        write_object(dir.path(), &make_object("root", "the root"));
        write_object(dir.path(), &make_object("core::Parser", ""));
        write_object(dir.path(), &make_object("core::Lexer", ""));
        fs::write(dir.path().join("objects").join("notes.txt"), b"x").unwrap();

        let serializer = DiskSerializer::new(dir.path());
        let paths = serializer.all_object_paths().unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.extension().unwrap() == "dat"));
        assert!(!paths.contains(&layout::root_object_path(dir.path())));
    }

    #[test]
    fn enumeration_is_sorted() {
        let dir = make_store_dir();
        write_object(dir.path(), &make_object("zeta", ""));
        write_object(dir.path(), &make_object("alpha", ""));
        write_object(dir.path(), &make_object("mid::inner", ""));

        let serializer = DiskSerializer::new(dir.path());
        let paths = serializer.all_object_paths().unwrap();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }
}
