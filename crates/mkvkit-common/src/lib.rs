//! mkvkit-common: shared constants and utilities.
//!
//! - **Path Utilities**: Matroska detection and the directory listing used by
//!   every batch command
//! - **Language Lists**: parsing of comma separated ISO 639-2 code lists,
//!   including the `all` sentinel
//!
//! # Examples
//!
//! ```
//! use mkvkit_common::lang::LanguageSpec;
//! use mkvkit_common::paths::is_matroska_file;
//! use std::path::Path;
//!
//! assert!(is_matroska_file(Path::new("movie.mkv")));
//!
//! let spec: LanguageSpec = "eng,JPN".parse().unwrap();
//! assert_eq!(spec.resolve(&[]), vec!["eng", "jpn"]);
//! ```

pub mod lang;
pub mod paths;

pub use lang::{LanguageSpec, ParseLanguageError};
