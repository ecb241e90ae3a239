use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::key::ObjectKey;

/// The kind of documentation entity an object represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A namespace grouping other entities.
    Module,
    /// A class or type definition.
    Class,
    /// A callable attached to a namespace or class.
    Method,
    /// A named constant.
    Constant,
    /// A declared attribute (reader/writer pair or field).
    Attribute,
    /// Placeholder for a referenced entity whose definition has not been
    /// resolved yet.
    Proxy,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Class => write!(f, "class"),
            Self::Method => write!(f, "method"),
            Self::Constant => write!(f, "constant"),
            Self::Attribute => write!(f, "attribute"),
            Self::Proxy => write!(f, "proxy"),
        }
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "class" => Ok(Self::Class),
            "method" => Ok(Self::Method),
            "constant" => Ok(Self::Constant),
            "attribute" => Ok(Self::Attribute),
            "proxy" => Ok(Self::Proxy),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

/// A source-file location attached to an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Path of the source file, relative to the documented project root.
    pub path: String,
    /// 1-based line of the definition.
    pub line: u32,
}

impl FileRef {
    /// Create a new file reference.
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

/// The identity prefix of a serialized [`DocObject`].
///
/// Serialized form:
/// ```text
/// [key (length-prefixed string)]
/// [kind (enum discriminant)]
/// [... remaining DocObject fields ...]
/// ```
///
/// Decoding an `ObjectHeader` from the bytes of a serialized `DocObject`
/// yields the object's identity without touching the body. The codec must
/// tolerate trailing bytes for this to work; bincode's plain `deserialize`
/// does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHeader {
    /// Logical key of the object.
    pub key: ObjectKey,
    /// Kind of the object.
    pub kind: ObjectKind,
}

/// A parsed documentation entity.
///
/// `key` and `kind` must stay the first two fields in declaration order:
/// [`ObjectHeader`] decodes exactly that prefix of a serialized object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocObject {
    /// Logical key of the object within the graph.
    pub key: ObjectKey,
    /// Kind of entity.
    pub kind: ObjectKind,
    /// Raw documentation text attached to the entity.
    pub docstring: String,
    /// Source locations where the entity is defined.
    pub files: Vec<FileRef>,
    /// Keys of entities nested under this one.
    pub children: Vec<ObjectKey>,
}

impl DocObject {
    /// Create an entity with an empty body.
    pub fn new(key: impl Into<ObjectKey>, kind: ObjectKind) -> Self {
        Self {
            key: key.into(),
            kind,
            docstring: String::new(),
            files: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build a minimally-initialized object from its serialized header.
    ///
    /// The result carries identity only: body fields are empty and
    /// cross-references are not wired. Callers materialize the full entity
    /// later if they need it.
    pub fn from_header(header: ObjectHeader) -> Self {
        Self::new(header.key, header.kind)
    }

    /// The entity's own name (last key segment).
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// Attach documentation text.
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = docstring.into();
        self
    }

    /// Record a source location for this entity.
    pub fn record_file(&mut self, path: impl Into<String>, line: u32) {
        self.files.push(FileRef::new(path, line));
    }

    /// Register a nested entity by key.
    pub fn add_child(&mut self, key: impl Into<ObjectKey>) {
        self.children.push(key.into());
    }
}
