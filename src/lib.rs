//! mkvkit - Matroska toolbox
//!
//! This library crate exposes the CLI plumbing for integration testing.

pub mod batch;
pub mod config;
pub mod toolbox;
