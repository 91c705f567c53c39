//! Persistent data — the snapshot codec and storage file.

pub mod store;
