//! mkvtoolnix invocations: track, chapter and attachment extraction, and
//! in-place property edits.
//!
//! Every builder returns a [`crate::ToolCommand`] without running it, so
//! callers decide between dry runs, blocking and async execution.

mod extract;
mod propedit;

pub use extract::{
    chapters_destination, extract_attachments_command, extract_chapters_command,
    extract_tracks_command, track_destination,
};
pub use propedit::{
    add_attachment_command, chapters_command, delete_attachments_command, fix_attachment_command,
    tag_command,
};
