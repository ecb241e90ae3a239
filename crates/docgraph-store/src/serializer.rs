use std::path::{Path, PathBuf};

use docgraph_types::{DocObject, ObjectKey};

use crate::error::StoreResult;

/// Decoding collaborator the store falls back to on a cache miss.
///
/// All implementations must satisfy these invariants:
/// - `deserialize_key` returns `Ok(None)` for a key with no blob on disk.
///   Corruption and I/O failure are errors; a corrupt blob is never
///   replaced with a default object.
/// - `deserialize_path` with `lazy` set builds a minimally-initialized
///   object from the identity header only. Cross-references are wired
///   later, once every identity exists.
/// - `all_object_paths` lists every object blob except the auxiliary files,
///   in a deterministic order.
pub trait Serializer {
    /// Decode the single object stored under `key`.
    ///
    /// Returns `Ok(None)` if no blob exists for the key.
    fn deserialize_key(&self, key: &ObjectKey) -> StoreResult<Option<DocObject>>;

    /// Decode the blob at `path`.
    ///
    /// With `lazy` set, only the identity header is read and the returned
    /// object is a minimally-initialized proxy.
    fn deserialize_path(&self, path: &Path, lazy: bool) -> StoreResult<DocObject>;

    /// Enumerate every on-disk object blob.
    fn all_object_paths(&self) -> StoreResult<Vec<PathBuf>>;
}
