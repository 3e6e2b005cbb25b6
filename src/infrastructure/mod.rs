//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host` and the plugin's private data
//! directory under `/data`.

pub mod paths;

pub use paths::{data_dir, expand_tilde, trace_file};
