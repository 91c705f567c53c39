//! Snapshot data model — the nested structure written to the storage file.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::{LayoutBlob, ScreenId, MAX_SCREEN_ID};

/// Frame attributes as captured, keyed by attribute name.
pub type FrameAttrs = BTreeMap<String, Value>;

/// Attribute keys never stored: they reference live buffers or transient UI
/// state that has no meaning in a later session.
pub const EXCLUDED_FRAME_KEYS: [&str; 3] = ["buffer-list", "buried-buffer-list", "minibuffer"];

/// Everything FrameKeep persists about one session.
///
/// The first frame config is always the frame that was selected at capture
/// time; restore relies on that to put focus back where it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frames: Vec<FrameConfig>,
}

/// One frame's stored state. Frames have no identity that survives a
/// session, so a config is identified only by its position in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    pub attrs: FrameAttrs,
    /// Screens ordered least-recently-used first, so replaying them in
    /// order leaves the most-recently-used screen active.
    pub screens: Vec<ScreenConfig>,
}

/// One screen's stored state: its slot id and the opaque layout blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub screen: ScreenId,
    pub layout: LayoutBlob,
}

impl Snapshot {
    /// Total screens stored across all frames.
    pub fn screen_count(&self) -> usize {
        self.frames.iter().map(|frame| frame.screens.len()).sum()
    }

    /// Strict structural checks beyond what deserialization enforces.
    /// Returns one message per violation; empty means the snapshot is sound.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.frames.is_empty() {
            problems.push("snapshot stores no frames".to_string());
        }
        for (i, frame) in self.frames.iter().enumerate() {
            for key in EXCLUDED_FRAME_KEYS {
                if frame.attrs.contains_key(key) {
                    problems.push(format!("frame {i}: transient attribute '{key}'"));
                }
            }
            let mut seen = BTreeSet::new();
            for config in &frame.screens {
                if config.screen.0 > MAX_SCREEN_ID {
                    problems.push(format!(
                        "frame {i}: screen id {} out of range",
                        config.screen.0
                    ));
                }
                if !seen.insert(config.screen) {
                    problems.push(format!(
                        "frame {i}: duplicate screen id {}",
                        config.screen.0
                    ));
                }
            }
        }
        problems
    }
}
