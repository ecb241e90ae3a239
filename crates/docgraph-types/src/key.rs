//! Logical keys for documentation objects.
//!
//! A key is a `::`-separated path naming an entity within the documented
//! code base, e.g. `core::store::DocStore`. The empty string is an alias
//! for the reserved `root` key, the canonical entry point of the object
//! graph. Aliasing is applied once, at construction, so every accessor that
//! takes a key shares a single normalization rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the reserved key addressing the graph root.
pub const ROOT_KEY: &str = "root";

/// Separator between key segments.
pub const SEPARATOR: &str = "::";

/// Logical key of a documentation object.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a key from a raw string. The empty string normalizes to the
    /// reserved `root` key.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() {
            Self(ROOT_KEY.to_string())
        } else {
            Self(raw)
        }
    }

    /// The key addressing the graph root.
    pub fn root() -> Self {
        Self(ROOT_KEY.to_string())
    }

    /// Returns `true` if this is the root key.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_KEY
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `::`-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The last segment: the entity's own name.
    pub fn name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Build a child key by appending one segment.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}{}{}", self.0, SEPARATOR, name))
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ObjectKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
