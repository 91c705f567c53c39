//! Layout engines — capture, restore, and the autosave tracker.
//!
//! `capture` walks live frames into a [`crate::types::snapshot::Snapshot`].
//! `restore` reconciles a live session against a stored one. `autosave`
//! debounces hook-driven periodic saves.

pub mod autosave;
pub mod capture;
pub mod restore;
