//! FrameKeep — persist and rebuild multi-frame, multi-screen editor layouts.
//!
//! FrameKeep snapshots the layout state of an editing session: every live
//! frame, each frame's screens (tab slots), and each screen's window
//! arrangement. The snapshot is written to a single storage file and can
//! later be replayed against a live session, reconciling frames and screens
//! until they match the stored state.
//!
//! The live editor is reached only through the [`editor::EditorHost`] trait.
//! Window arrangements travel as opaque blobs produced by the host's own
//! layout codec, so FrameKeep never needs to understand their contents.

pub mod command;
pub mod data;
pub mod editor;
pub mod error;
pub mod help;
pub mod layout;
pub mod sys;
pub mod types;
