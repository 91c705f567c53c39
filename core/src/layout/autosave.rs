//! Autosave tracker — debounces hook-driven periodic saves.
//!
//! Hosts report layout mutations through [`AutosaveTimer::mark_dirty`] and
//! poll [`AutosaveTimer::due`] on their tick. A save is due once the session
//! is dirty and the configured interval has passed since the last save.

/// Tracks dirtiness and the last save time for debounced autosaving.
#[derive(Debug)]
pub struct AutosaveTimer {
    interval_ms: u64,
    dirty: bool,
    last_save_ms: u64,
}

impl AutosaveTimer {
    /// Default spacing between automatic saves.
    pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

    pub fn new(interval_ms: u64) -> AutosaveTimer {
        AutosaveTimer {
            interval_ms,
            dirty: false,
            last_save_ms: 0,
        }
    }

    /// Note a layout mutation since the last save.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a save should happen at `now_ms`.
    pub fn due(&self, now_ms: u64) -> bool {
        self.dirty && now_ms.saturating_sub(self.last_save_ms) >= self.interval_ms
    }

    /// Record a completed save at `now_ms`.
    pub fn record_save(&mut self, now_ms: u64) {
        self.dirty = false;
        self.last_save_ms = now_ms;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
