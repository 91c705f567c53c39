//! In-memory editor host — the reference [`EditorHost`] implementation.
//!
//! `MemEditor` models just enough of a real editor for the engines to be
//! exercised end to end: frames carry attribute maps (including the
//! transient keys a live host would expose), screens live in slots 0-9 and
//! are created into the smallest free slot, and each screen holds a
//! [`WindowTree`] whose JSON text serves as the opaque layout blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::editor::{EditorHost, FrameId, LayoutBlob, ScreenId, MAX_SCREEN_ID};
use crate::error::{Result, SnapshotError};
use crate::types::snapshot::FrameAttrs;

/// Recursive window-split arrangement held by each `MemEditor` screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowTree {
    Pane { buffer: String },
    Row { children: Vec<WindowTree> },
    Col { children: Vec<WindowTree> },
}

impl WindowTree {
    /// The single-pane arrangement every blank screen starts with.
    pub fn scratch() -> WindowTree {
        WindowTree::Pane {
            buffer: "*scratch*".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct MemFrame {
    attrs: FrameAttrs,
    screens: BTreeMap<ScreenId, WindowTree>,
    /// Live screen ids oldest-selected first; the last entry is active.
    history: Vec<ScreenId>,
}

impl MemFrame {
    fn new() -> MemFrame {
        let mut screens = BTreeMap::new();
        screens.insert(ScreenId(0), WindowTree::scratch());
        MemFrame {
            attrs: default_attrs(),
            screens,
            history: vec![ScreenId(0)],
        }
    }
}

fn default_attrs() -> FrameAttrs {
    let mut attrs = FrameAttrs::new();
    attrs.insert("top".to_string(), json!(0));
    attrs.insert("left".to_string(), json!(0));
    attrs.insert("width".to_string(), json!(120));
    attrs.insert("height".to_string(), json!(40));
    attrs.insert("buffer-list".to_string(), json!(["*scratch*"]));
    attrs.insert("buried-buffer-list".to_string(), json!([]));
    attrs.insert("minibuffer".to_string(), json!("minibuf-0"));
    attrs
}

/// In-memory host holding frames, screens, and window trees.
#[derive(Debug)]
pub struct MemEditor {
    frames: Vec<(FrameId, MemFrame)>,
    selected: FrameId,
    focused: FrameId,
    next_frame: u64,
    /// When set, `capture_layout` fails on this screen.
    fail_capture_on: Option<ScreenId>,
    resumed: usize,
}

impl MemEditor {
    /// A session with one frame holding one scratch screen.
    pub fn new() -> MemEditor {
        let first = FrameId(1);
        MemEditor {
            frames: vec![(first, MemFrame::new())],
            selected: first,
            focused: first,
            next_frame: 2,
            fail_capture_on: None,
            resumed: 0,
        }
    }

    /// Set one attribute on a frame directly, bypassing the merge path.
    pub fn set_attr(&mut self, frame: FrameId, key: &str, value: serde_json::Value) {
        if let Some(state) = self.frame_state_mut(frame) {
            state.attrs.insert(key.to_string(), value);
        }
    }

    /// Make `capture_layout` fail whenever the given screen is active.
    pub fn fail_capture_on(&mut self, screen: ScreenId) {
        self.fail_capture_on = Some(screen);
    }

    /// How many times `resume_session` has been called.
    pub fn resume_count(&self) -> usize {
        self.resumed
    }

    /// The frame currently holding input focus.
    pub fn focused_frame(&self) -> FrameId {
        self.focused
    }

    /// A frame's screen history without switching to the frame.
    pub fn history_of(&self, frame: FrameId) -> Vec<ScreenId> {
        self.frame_state(frame)
            .map(|state| state.history.clone())
            .unwrap_or_default()
    }

    /// The stored window tree for a frame's screen, if both are live.
    pub fn screen_tree(&self, frame: FrameId, screen: ScreenId) -> Option<&WindowTree> {
        self.frame_state(frame)?.screens.get(&screen)
    }

    fn frame_state(&self, frame: FrameId) -> Option<&MemFrame> {
        self.frames
            .iter()
            .find(|(id, _)| *id == frame)
            .map(|(_, state)| state)
    }

    fn frame_state_mut(&mut self, frame: FrameId) -> Option<&mut MemFrame> {
        self.frames
            .iter_mut()
            .find(|(id, _)| *id == frame)
            .map(|(_, state)| state)
    }

    fn selected_state(&self) -> Option<&MemFrame> {
        self.frame_state(self.selected)
    }

    fn require_selected_mut(&mut self) -> Result<&mut MemFrame> {
        let selected = self.selected;
        self.frame_state_mut(selected)
            .ok_or_else(|| SnapshotError::host(format!("selected frame {} is gone", selected.0)))
    }
}

impl Default for MemEditor {
    fn default() -> Self {
        MemEditor::new()
    }
}

impl EditorHost for MemEditor {
    fn frames(&self) -> Vec<FrameId> {
        self.frames.iter().map(|(id, _)| *id).collect()
    }

    fn selected_frame(&self) -> FrameId {
        self.selected
    }

    fn select_frame(&mut self, frame: FrameId) -> Result<()> {
        if self.frame_state(frame).is_none() {
            return Err(SnapshotError::host(format!("unknown frame {}", frame.0)));
        }
        self.selected = frame;
        Ok(())
    }

    fn create_frame(&mut self) -> Result<FrameId> {
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        self.frames.push((id, MemFrame::new()));
        Ok(id)
    }

    fn destroy_frame(&mut self, frame: FrameId) -> Result<()> {
        if self.frames.len() == 1 {
            return Err(SnapshotError::host("cannot destroy the last frame"));
        }
        let Some(pos) = self.frames.iter().position(|(id, _)| *id == frame) else {
            return Err(SnapshotError::host(format!("unknown frame {}", frame.0)));
        };
        self.frames.remove(pos);
        if self.selected == frame {
            self.selected = self.frames[0].0;
        }
        if self.focused == frame {
            self.focused = self.frames[0].0;
        }
        Ok(())
    }

    fn focus_frame(&mut self, frame: FrameId) -> Result<()> {
        self.select_frame(frame)?;
        self.focused = frame;
        Ok(())
    }

    fn frame_attrs(&self, frame: FrameId) -> FrameAttrs {
        self.frame_state(frame)
            .map(|state| state.attrs.clone())
            .unwrap_or_default()
    }

    fn update_frame_attrs(&mut self, frame: FrameId, attrs: &FrameAttrs) -> Result<()> {
        let state = self
            .frame_state_mut(frame)
            .ok_or_else(|| SnapshotError::host(format!("unknown frame {}", frame.0)))?;
        for (key, value) in attrs {
            state.attrs.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn screen_history(&self) -> Vec<ScreenId> {
        self.selected_state()
            .map(|state| state.history.clone())
            .unwrap_or_default()
    }

    fn active_screen(&self) -> ScreenId {
        self.selected_state()
            .and_then(|state| state.history.last().copied())
            .unwrap_or(ScreenId(0))
    }

    fn screen_live(&self, screen: ScreenId) -> bool {
        self.selected_state()
            .map(|state| state.screens.contains_key(&screen))
            .unwrap_or(false)
    }

    fn switch_screen(&mut self, screen: ScreenId) -> Result<()> {
        let state = self.require_selected_mut()?;
        if !state.screens.contains_key(&screen) {
            return Err(SnapshotError::host(format!("screen {} is not live", screen.0)));
        }
        state.history.retain(|s| *s != screen);
        state.history.push(screen);
        Ok(())
    }

    fn create_screen(&mut self) -> Result<ScreenId> {
        let state = self.require_selected_mut()?;
        let slot = (0..=MAX_SCREEN_ID)
            .map(ScreenId)
            .find(|s| !state.screens.contains_key(s))
            .ok_or_else(|| SnapshotError::host("all screen slots are in use"))?;
        state.screens.insert(slot, WindowTree::scratch());
        state.history.push(slot);
        Ok(slot)
    }

    fn kill_screen(&mut self, screen: ScreenId) -> Result<()> {
        let state = self.require_selected_mut()?;
        if !state.screens.contains_key(&screen) {
            return Err(SnapshotError::host(format!("screen {} is not live", screen.0)));
        }
        if state.screens.len() == 1 {
            return Err(SnapshotError::host("cannot kill the last screen"));
        }
        state.screens.remove(&screen);
        state.history.retain(|s| *s != screen);
        Ok(())
    }

    fn capture_layout(&self) -> Result<LayoutBlob> {
        let active = self.active_screen();
        if self.fail_capture_on == Some(active) {
            return Err(SnapshotError::host(format!(
                "layout codec failure injected for screen {}",
                active.0
            )));
        }
        let tree = self
            .selected_state()
            .and_then(|state| state.screens.get(&active))
            .ok_or_else(|| SnapshotError::host(format!("screen {} is not live", active.0)))?;
        let text = serde_json::to_string(tree)
            .map_err(|e| SnapshotError::host(format!("layout encode: {e}")))?;
        Ok(LayoutBlob(text))
    }

    fn apply_layout(&mut self, blob: &LayoutBlob) -> Result<()> {
        let tree: WindowTree = serde_json::from_str(&blob.0)
            .map_err(|e| SnapshotError::host(format!("layout blob did not parse: {e}")))?;
        let active = self.active_screen();
        let state = self.require_selected_mut()?;
        state.screens.insert(active, tree);
        Ok(())
    }

    fn resume_session(&mut self) -> Result<()> {
        self.resumed += 1;
        Ok(())
    }
}
