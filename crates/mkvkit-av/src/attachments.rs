//! Attachment filtering and MIME type repair.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::container::AttachmentRecord;
use crate::{Error, Result};

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_TTF: &str = "application/x-truetype-font";
pub const MIME_OTF: &str = "application/vnd.ms-opentype";
pub const MIME_SFNT: &str = "application/font-sfnt";

/// Filter entry matching attachments that carry no content type.
pub const EMPTY_TYPE: &str = "";

/// Broad attachment families selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Image,
    Font,
}

impl AttachmentKind {
    pub fn mime_types(&self) -> &'static [&'static str] {
        match self {
            AttachmentKind::Image => &[MIME_JPEG, MIME_PNG],
            AttachmentKind::Font => &[MIME_TTF, MIME_OTF, MIME_SFNT],
        }
    }
}

impl FromStr for AttachmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "images" => Ok(AttachmentKind::Image),
            "font" | "fonts" => Ok(AttachmentKind::Font),
            other => Err(Error::invalid_argument(format!(
                "unknown attachment type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Font => write!(f, "font"),
        }
    }
}

/// Parse `font,image` into the union of the kinds' MIME types.
pub fn parse_attachment_kinds(s: &str) -> Result<HashSet<String>> {
    let mut wanted = HashSet::new();
    for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
        let kind: AttachmentKind = item.parse()?;
        wanted.extend(kind.mime_types().iter().map(|m| m.to_string()));
    }
    if wanted.is_empty() {
        return Err(Error::invalid_argument("no attachment type given"));
    }
    Ok(wanted)
}

/// Selects attachments by exact content type.
pub struct AttachmentClassifier;

impl AttachmentClassifier {
    /// Attachments whose content type is in `wanted`, in report order.
    ///
    /// An attachment without a content type matches only if `wanted`
    /// contains [`EMPTY_TYPE`].
    pub fn filter<'a>(
        attachments: &'a [AttachmentRecord],
        wanted: &HashSet<String>,
    ) -> Vec<&'a AttachmentRecord> {
        attachments
            .iter()
            .filter(|a| wanted.contains(&a.content_type))
            .collect()
    }

    /// MIME type implied by the file extension, if the toolbox knows one.
    pub fn repair_mime_type(file_name: &str) -> Option<&'static str> {
        let ext = Path::new(file_name)
            .extension()?
            .to_string_lossy()
            .to_ascii_lowercase();
        match ext.as_str() {
            "ttf" => Some(MIME_TTF),
            "otf" => Some(MIME_OTF),
            "jpg" | "jpeg" => Some(MIME_JPEG),
            _ => None,
        }
    }
}
