//! Lazy-loading, disk-backed storage for the docgraph object model.
//!
//! A documentation run produces a large graph of parsed entities, but most
//! consumers only ever touch a handful of them. [`DocStore`] sits between an
//! in-memory cache and the serialized on-disk graph: it binds to a backing
//! store, eagerly loads the small auxiliary tables, and materializes
//! individual objects on demand. Deserialization cost is paid per key
//! actually touched, once, until the store is fully loaded.
//!
//! # Components
//!
//! - [`DocStore`] -- the store: format detection, the put/get cache
//!   contract, full enumeration, and guarded teardown
//! - [`Serializer`] -- the decoding collaborator the store falls back to on
//!   a cache miss
//! - [`DiskSerializer`] -- bincode-over-directory implementation of
//!   [`Serializer`]
//! - [`layout`] -- the on-disk layout of a directory-format store
//!
//! # Backing formats
//!
//! A legacy store is a single file holding the whole object table; loading
//! one materializes everything immediately. A directory store keeps one
//! blob per object under `objects/`, plus an advisory checksum table, a
//! proxy-type table, and the graph root, all optional.
//!
//! # Concurrency
//!
//! The store is a single-threaded sequential structure: every operation
//! completes before returning and there is no internal locking. Callers
//! that share a store across threads must wrap the whole store in one
//! external mutex.

pub mod checksums;
pub mod disk;
pub mod error;
pub mod layout;
pub mod serializer;
pub mod store;

pub use disk::DiskSerializer;
pub use error::{StoreError, StoreResult};
pub use serializer::Serializer;
pub use store::{BackingKind, DocStore, LoadState};
