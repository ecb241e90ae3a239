use std::path::PathBuf;

/// Errors from store operations.
///
/// Expected negative outcomes (a missing backing store on load, a guarded
/// teardown) are `Ok(false)` returns on the operations themselves; these
/// variants signal corruption or I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialized payload could not be decoded.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The on-disk object scan failed.
    #[error("object enumeration failed: {0}")]
    Enumeration(#[from] walkdir::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
