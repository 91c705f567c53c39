//! Editor host interface — the seam between FrameKeep and the live editor.
//!
//! The capture and restore engines never touch frames or screens directly;
//! they drive the session through [`EditorHost`]. Screen operations act on
//! the currently selected frame, mirroring how the primitives behave in a
//! real editor. [`mem::MemEditor`] is the reference implementation used by
//! the tests and the standalone CLI.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::snapshot::FrameAttrs;

pub mod mem;

/// Highest usable screen slot. Slots are numbered 0 through 9.
pub const MAX_SCREEN_ID: u8 = 9;

/// Identifies a live top-level frame. Valid only within one session; stored
/// snapshots never contain frame ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u64);

/// Identifies a screen (tab) slot within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub u8);

/// Opaque serialized window arrangement. Produced and consumed only by the
/// host's layout codec; FrameKeep stores and compares it, never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutBlob(pub String);

/// Everything FrameKeep needs from the editor it runs inside.
///
/// Frame operations address frames by id. Screen operations always act on
/// the selected frame's screens.
pub trait EditorHost {
    /// All live frames in the host's stable enumeration order. The selected
    /// frame is not necessarily first.
    fn frames(&self) -> Vec<FrameId>;

    fn selected_frame(&self) -> FrameId;

    fn select_frame(&mut self, frame: FrameId) -> Result<()>;

    /// Create a fresh frame with a single blank screen. Selection is left
    /// where it was.
    fn create_frame(&mut self) -> Result<FrameId>;

    fn destroy_frame(&mut self, frame: FrameId) -> Result<()>;

    /// Give a frame input focus, selecting it as well.
    fn focus_frame(&mut self, frame: FrameId) -> Result<()>;

    /// The frame's current attribute map.
    fn frame_attrs(&self, frame: FrameId) -> FrameAttrs;

    /// Merge `attrs` into the frame's attribute map, overwriting existing
    /// keys and leaving unmentioned keys alone.
    fn update_frame_attrs(&mut self, frame: FrameId, attrs: &FrameAttrs) -> Result<()>;

    /// The selected frame's live screens ordered oldest-selected first; the
    /// last entry is the active screen. Every live screen appears exactly
    /// once.
    fn screen_history(&self) -> Vec<ScreenId>;

    fn active_screen(&self) -> ScreenId;

    /// Whether the slot holds a live screen on the selected frame.
    fn screen_live(&self, screen: ScreenId) -> bool;

    /// Make a live screen the active one.
    fn switch_screen(&mut self, screen: ScreenId) -> Result<()>;

    /// Create one blank screen on the selected frame, make it active, and
    /// return its slot id. Fails when all slots are taken.
    fn create_screen(&mut self) -> Result<ScreenId>;

    /// Destroy a live screen. Hosts may refuse to kill the last remaining
    /// screen of a frame.
    fn kill_screen(&mut self, screen: ScreenId) -> Result<()>;

    /// Serialize the active screen's window arrangement.
    fn capture_layout(&self) -> Result<LayoutBlob>;

    /// Replace the active screen's window arrangement with a previously
    /// captured blob.
    fn apply_layout(&mut self, blob: &LayoutBlob) -> Result<()>;

    /// Reconnect to an external session before a restore. Hosts without a
    /// session layer keep the default no-op.
    fn resume_session(&mut self) -> Result<()> {
        Ok(())
    }
}
