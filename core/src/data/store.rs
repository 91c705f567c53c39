//! Snapshot storage — serialize, deserialize, load, and save.
//!
//! The storage file holds exactly one snapshot as pretty-printed JSON, read
//! and written whole. Saving serializes fully in memory before touching the
//! destination, so an encode failure leaves the previous file intact.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, SnapshotError};
use crate::types::snapshot::Snapshot;

/// Serialize a snapshot to its stored textual form.
pub fn serialize_snapshot(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))
}

/// Parse stored text back into a snapshot.
pub fn deserialize_snapshot(text: &str) -> Result<Snapshot> {
    serde_json::from_str(text).map_err(|e| SnapshotError::Malformed(e.to_string()))
}

/// Write a snapshot to `path`, creating parent directories as needed.
pub fn save_to_file(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let encoded = serialize_snapshot(snapshot)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, encoded)?;
    info!(path = %path.display(), frames = snapshot.frames.len(), "snapshot written");
    Ok(())
}

/// Read and parse the snapshot stored at `path`.
///
/// An absent file is reported as [`SnapshotError::MissingFile`] so callers
/// can treat "nothing saved yet" differently from real failures. Any
/// content that is not a valid snapshot, including non-UTF-8 bytes, is
/// [`SnapshotError::Malformed`].
pub fn load_from_file(path: &Path) -> Result<Snapshot> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SnapshotError::MissingFile(path.to_path_buf()));
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(SnapshotError::Malformed(e.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot = deserialize_snapshot(&text)?;
    debug!(path = %path.display(), frames = snapshot.frames.len(), "snapshot loaded");
    Ok(snapshot)
}
