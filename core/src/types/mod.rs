//! Core data types — runtime settings and the stored snapshot model.

pub mod config;
pub mod snapshot;
