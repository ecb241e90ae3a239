//! Foundation types for docgraph.
//!
//! This crate provides the object model shared by the docgraph system: the
//! logical keys that identify documentation entities, the entities
//! themselves, and the serialized-header contract that lets a store
//! materialize an entity's identity without decoding its whole body.
//!
//! # Key Types
//!
//! - [`ObjectKey`] -- `::`-separated logical path identifying an entity
//! - [`ObjectKind`] -- what sort of entity an object is
//! - [`DocObject`] -- a parsed documentation entity
//! - [`ObjectHeader`] -- the identity prefix of a serialized [`DocObject`]

pub mod error;
pub mod key;
pub mod object;

pub use error::TypeError;
pub use key::ObjectKey;
pub use object::{DocObject, FileRef, ObjectHeader, ObjectKind};
