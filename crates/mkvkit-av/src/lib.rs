//! # mkvkit-av
//!
//! Matroska container model and track selection on top of mkvtoolnix.
//!
//! This crate provides functionality for:
//! - Building a [`ContainerModel`] from the `mkvmerge -J` identification
//!   document
//! - Classifying codecs and ranking audio formats ([`CodecCatalog`])
//! - Choosing the tracks to extract, keeping the best audio track per
//!   language ([`TrackSelector`])
//! - Filtering and repairing attachments ([`AttachmentClassifier`])
//! - Computing track names and languages for tagging
//! - Building mkvextract and mkvpropedit invocations
//!
//! ## Example
//!
//! ```no_run
//! use mkvkit_av::{ContainerModel, MkvmergeInspector, SelectionPolicy, TrackSelector};
//!
//! let inspector = MkvmergeInspector::locate(None)?;
//! let model = ContainerModel::open("/path/to/video.mkv", &inspector)?;
//! let plan = TrackSelector::default().select(&model, &SelectionPolicy::new())?;
//! for entry in &plan.entries {
//!     println!("{}", entry);
//! }
//! # Ok::<(), mkvkit_av::Error>(())
//! ```

mod error;
pub mod actions;
pub mod attachments;
pub mod catalog;
pub mod command;
pub mod container;
pub mod inspect;
pub mod select;
pub mod tagging;
pub mod tools;

// Re-exports
pub use attachments::{parse_attachment_kinds, AttachmentClassifier, AttachmentKind};
pub use catalog::{parse_subtitle_families, CodecCatalog, CodecEntry, SubtitleFamily, TrackCategory};
pub use command::{ToolCommand, ToolOutput};
pub use container::{AttachmentRecord, AudioScore, ContainerModel, TrackRecord};
pub use error::{Error, Result};
pub use inspect::{describe_video, Inspector, MkvmergeInspector};
pub use select::{ExtractionPlan, OutputSuffix, PlanEntry, SelectionPolicy, TrackSelector};
pub use tagging::{plan_tags, TagOptions, TagPlan};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
