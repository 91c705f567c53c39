//! Command — the typed interface into FrameKeep.
//!
//! Every operation an embedding editor or the CLI can request is a
//! [`Command`] variant, and every outcome is a [`Response`]. Both serialize
//! to tagged JSON so hosts written in other languages can drive the system
//! over a text channel.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A request for the FrameKeep runtime.
///
/// `file` fields override the configured storage path; when absent the
/// path from [`crate::types::config::KeepSettings`] is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Report settings and the state of the stored snapshot.
    #[serde(rename = "status")]
    Status {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    /// Capture every live frame and write the storage file.
    #[serde(rename = "snapshot.save")]
    SnapshotSave {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
    },

    /// Rebuild the live layout from the storage file.
    #[serde(rename = "snapshot.restore")]
    SnapshotRestore {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
        /// Restore into freshly created frames instead of replacing the
        /// current ones.
        #[serde(default)]
        new_frames: bool,
    },

    /// Reconnect the host's external session, then restore.
    #[serde(rename = "snapshot.resume")]
    SnapshotResume {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
    },

    /// Summarize the stored snapshot without touching the live session.
    #[serde(rename = "snapshot.show")]
    SnapshotShow {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
    },

    /// Validate the stored snapshot without touching the live session.
    #[serde(rename = "snapshot.check")]
    SnapshotCheck {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<PathBuf>,
    },

    /// Arm the save-on-shutdown hook.
    #[serde(rename = "hook.setup")]
    SetupHook,

    /// Disarm the save-on-shutdown hook.
    #[serde(rename = "hook.remove")]
    RemoveHook,

    /// Show help, optionally for one command or group.
    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}

/// Uniform reply for every executed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}

impl Response {
    pub fn ok(output: impl Into<String>) -> Response {
        Response::Ok {
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Response {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }
}
