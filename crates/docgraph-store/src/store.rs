//! The lazy-loading, disk-backed object store.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use docgraph_types::{DocObject, ObjectKey};
use tracing::debug;

use crate::checksums::parse_checksums;
use crate::disk::{decode_file, DiskSerializer};
use crate::error::StoreResult;
use crate::layout;
use crate::serializer::Serializer;

/// Format of the backing store, detected once at load time.
///
/// Subsequent operations match on this tag; there is no dispatch across
/// store subtypes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackingKind {
    /// No backing store bound.
    #[default]
    Unbound,
    /// Legacy format: the bound path is one serialized object table.
    SingleFile,
    /// Directory format: auxiliary files plus one blob per object.
    Directory,
}

/// Lazy-load bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadState {
    /// Objects known to exist on disk (0 until determined).
    pub available: u64,
    /// Objects materialized into the cache by lazy fetch or full load.
    pub loaded: u64,
    /// Set once a full load has run, or a single-file load made one
    /// unnecessary.
    pub complete: bool,
}

impl LoadState {
    /// Whether every available object is materialized.
    ///
    /// A pure function of the counters: complete was declared explicitly,
    /// or the loaded count caught up with a known, non-zero available
    /// count.
    pub fn is_fully_loaded(&self) -> bool {
        self.complete || (self.available > 0 && self.loaded >= self.available)
    }
}

/// Lazy-loading, disk-backed store for a documentation object graph.
///
/// A store starts empty and unbound. [`load`](DocStore::load) binds it to a
/// backing store; [`get`](DocStore::get) and [`put`](DocStore::put) operate
/// against the in-memory cache, with `get` falling back to the bound
/// [`Serializer`] on a miss while the store is not fully loaded.
/// [`keys`](DocStore::keys) and [`values`](DocStore::values) can force full
/// materialization; [`destroy`](DocStore::destroy) removes the backing
/// store under a suffix guard.
///
/// Once the store is fully loaded, absence is authoritative: a `get` of a
/// key that is not cached answers `None` without consulting the serializer.
#[derive(Default)]
pub struct DocStore {
    path: Option<PathBuf>,
    backing: BackingKind,
    cache: HashMap<ObjectKey, DocObject>,
    checksums: HashMap<String, String>,
    proxy_types: HashMap<String, String>,
    state: LoadState,
    serializer: Option<Box<dyn Serializer>>,
}

impl DocStore {
    /// Create an empty, unbound store.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------

    /// Bind the store to a backing store at `path`.
    ///
    /// Returns `Ok(true)` if a recognized backing store was found and
    /// bound, `Ok(false)` if the path is empty or nothing exists there (the
    /// store stays unbound). A regular file is treated as the legacy
    /// single-file format; a directory as the directory format. Decode
    /// failures in any auxiliary payload are fatal; absent auxiliary files
    /// are not.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<bool> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(false);
        }
        if path.is_file() {
            self.load_single_file(path)?;
            Ok(true)
        } else if path.is_dir() {
            self.load_directory(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Legacy format: the whole object table lives in one file. Everything
    /// is in memory after the decode, so no lazy fallback is ever needed.
    fn load_single_file(&mut self, path: &Path) -> StoreResult<()> {
        let table: HashMap<ObjectKey, DocObject> = decode_file(path)?;
        let count = table.len() as u64;
        self.cache.extend(table);
        self.checksums.clear();
        self.proxy_types.clear();
        self.serializer = None;
        self.state = LoadState {
            available: count,
            loaded: count,
            complete: true,
        };
        self.backing = BackingKind::SingleFile;
        self.path = Some(path.to_path_buf());
        debug!(path = %path.display(), objects = count, "loaded single-file store");
        Ok(())
    }

    fn load_directory(&mut self, path: &Path) -> StoreResult<()> {
        let checksums_file = layout::checksums_path(path);
        self.checksums = if checksums_file.is_file() {
            parse_checksums(&fs::read_to_string(&checksums_file)?)
        } else {
            HashMap::new()
        };

        let proxy_types_file = layout::proxy_types_path(path);
        self.proxy_types = if proxy_types_file.is_file() {
            decode_file(&proxy_types_file)?
        } else {
            HashMap::new()
        };

        // The graph root is the one object worth having up front; every
        // traversal starts there.
        let root_file = layout::root_object_path(path);
        if root_file.is_file() {
            let root: DocObject = decode_file(&root_file)?;
            self.cache.insert(ObjectKey::root(), root);
        } else {
            self.cache.remove(&ObjectKey::root());
        }

        let serializer = DiskSerializer::new(path);
        let available = serializer.all_object_paths()?.len() as u64;
        self.serializer = Some(Box::new(serializer));
        self.state = LoadState {
            available,
            loaded: 0,
            complete: false,
        };
        self.backing = BackingKind::Directory;
        self.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            available,
            checksums = self.checksums.len(),
            "loaded directory store"
        );
        Ok(())
    }

    // ---------------------------------------------------------------
    // Cache accessors
    // ---------------------------------------------------------------

    /// Store `object` under `key`, overwriting any existing entry.
    ///
    /// The empty-string key aliases to `root`. Counters are untouched.
    pub fn put(&mut self, key: impl Into<ObjectKey>, object: DocObject) {
        self.cache.insert(key.into(), object);
    }

    /// Fetch the object under `key`.
    ///
    /// A cache hit answers directly. On a miss, while the store is not
    /// fully loaded, the serializer is asked once and the result cached;
    /// repeated gets of the same key do not consult it again. Once fully
    /// loaded, a miss is authoritative.
    pub fn get(&mut self, key: impl Into<ObjectKey>) -> StoreResult<Option<DocObject>> {
        let key = key.into();
        if let Some(object) = self.cache.get(&key) {
            return Ok(Some(object.clone()));
        }
        if self.state.is_fully_loaded() {
            return Ok(None);
        }
        let Some(serializer) = &self.serializer else {
            return Ok(None);
        };
        match serializer.deserialize_key(&key)? {
            Some(object) => {
                self.state.loaded += 1;
                self.cache.insert(key, object.clone());
                Ok(Some(object))
            }
            None => Ok(None),
        }
    }

    /// Fetch the graph root.
    pub fn root(&mut self) -> StoreResult<Option<DocObject>> {
        self.get(ObjectKey::root())
    }

    /// Remove a cached entry, returning it.
    ///
    /// In-memory only; the backing store is not modified.
    pub fn delete(&mut self, key: impl Into<ObjectKey>) -> Option<DocObject> {
        self.cache.remove(&key.into())
    }

    // ---------------------------------------------------------------
    // Full enumeration
    // ---------------------------------------------------------------

    /// Keys of the cached objects. With `reload` set, the entire graph is
    /// materialized first; otherwise this is a deliberately partial view.
    pub fn keys(&mut self, reload: bool) -> StoreResult<Vec<ObjectKey>> {
        if reload {
            self.load_all()?;
        }
        Ok(self.cache.keys().cloned().collect())
    }

    /// Cached objects. With `reload` set, the entire graph is materialized
    /// first; otherwise this is a deliberately partial view.
    pub fn values(&mut self, reload: bool) -> StoreResult<Vec<DocObject>> {
        if reload {
            self.load_all()?;
        }
        Ok(self.cache.values().cloned().collect())
    }

    /// Materialize every enumerable on-disk object into the cache.
    ///
    /// Objects are deserialized lazily (identity only), keyed by the key
    /// decoded from each blob, without clobbering entries that were already
    /// fully materialized. A failure to enumerate or to decode any single
    /// blob is fatal: a full load promises completeness and cannot
    /// silently drop objects. No-op when the store is unbound or already
    /// fully loaded.
    pub fn load_all(&mut self) -> StoreResult<()> {
        if self.state.is_fully_loaded() {
            return Ok(());
        }
        let Some(serializer) = &self.serializer else {
            return Ok(());
        };
        debug!(path = ?self.path, "loading entire object graph");
        let paths = serializer.all_object_paths()?;
        self.state.available = paths.len() as u64;
        for path in &paths {
            let object = serializer.deserialize_path(path, true)?;
            self.cache.entry(object.key.clone()).or_insert(object);
        }
        self.state.loaded = self.state.available;
        self.state.complete = true;
        debug!(loaded = self.state.loaded, "object graph fully loaded");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Teardown
    // ---------------------------------------------------------------

    /// Delete the bound backing store from disk.
    ///
    /// Without `force`, the bound path must carry the recognized store
    /// extension ([`layout::has_store_extension`]); otherwise nothing is
    /// touched and `Ok(false)` is returned. File-vs-directory is
    /// re-resolved at destroy time, not reused from load time. The
    /// in-memory cache is left as-is and may still be inspected, but no
    /// further load of the destroyed path will succeed.
    pub fn destroy(&mut self, force: bool) -> StoreResult<bool> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        if !force && !layout::has_store_extension(&path) {
            return Ok(false);
        }
        if path.is_file() {
            fs::remove_file(&path)?;
        } else if path.is_dir() {
            fs::remove_dir_all(&path)?;
        }
        debug!(path = %path.display(), "destroyed backing store");
        Ok(true)
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// The bound backing path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Detected backing format.
    pub fn backing(&self) -> BackingKind {
        self.backing
    }

    /// Filename-to-checksum table from the last directory load.
    pub fn checksums(&self) -> &HashMap<String, String> {
        &self.checksums
    }

    /// Proxy-type table from the last directory load.
    pub fn proxy_types(&self) -> &HashMap<String, String> {
        &self.proxy_types
    }

    /// Recorded kind name for an unresolved reference.
    pub fn proxy_type(&self, name: &str) -> Option<&str> {
        self.proxy_types.get(name).map(String::as_str)
    }

    /// Whether every available object is materialized.
    pub fn is_fully_loaded(&self) -> bool {
        self.state.is_fully_loaded()
    }

    /// Objects materialized so far.
    pub fn loaded_objects(&self) -> u64 {
        self.state.loaded
    }

    /// Objects known to exist on disk.
    pub fn available_objects(&self) -> u64 {
        self.state.available
    }

    /// Number of cached objects.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl fmt::Debug for DocStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocStore")
            .field("backing", &self.backing)
            .field("cached_objects", &self.cache.len())
            .field("state", &self.state)
            .finish()
    }
}
