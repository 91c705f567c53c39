//! Error taxonomy for snapshot capture, storage, and restore.

use std::path::PathBuf;

/// Errors produced by the capture/store/restore pipeline.
///
/// `MissingFile` is the one non-fatal case: restoring from a path that was
/// never written reports it and leaves the live layout alone. Everything
/// else aborts the operation that raised it.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The storage file does not exist.
    #[error("no stored layout at {0}")]
    MissingFile(PathBuf),

    /// The storage file exists but does not parse as a snapshot.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// A snapshot could not be serialized.
    #[error("snapshot encode failed: {0}")]
    Encode(String),

    /// Reading or writing the storage file failed.
    #[error("snapshot storage: {0}")]
    Io(#[from] std::io::Error),

    /// An editor host primitive failed.
    #[error("editor host: {0}")]
    Host(String),
}

impl SnapshotError {
    /// Build a `Host` error from any displayable cause.
    pub fn host(message: impl Into<String>) -> SnapshotError {
        SnapshotError::Host(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
