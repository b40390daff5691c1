//! Container inspection.
//!
//! The [`Inspector`] trait is the seam between the model and the external
//! identification tool. Production code uses [`MkvmergeInspector`]; tests
//! pass closures returning canned documents.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::ToolCommand;
use crate::tools::{self, MEDIAINFO, MKVMERGE};
use crate::{Error, Result};

/// Default time allowed for one `mkvmerge -J` call.
pub const DEFAULT_INSPECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces the identification document (mkvmerge JSON) of a file.
pub trait Inspector {
    /// Identify the file at `path`.
    ///
    /// # Errors
    ///
    /// Any failure is reported as [`Error::ParseError`].
    fn identify(&self, path: &Path) -> Result<String>;
}

impl<F> Inspector for F
where
    F: Fn(&Path) -> Result<String>,
{
    fn identify(&self, path: &Path) -> Result<String> {
        self(path)
    }
}

/// Runs `mkvmerge -J`.
#[derive(Debug, Clone)]
pub struct MkvmergeInspector {
    program: PathBuf,
    timeout: Duration,
}

impl MkvmergeInspector {
    /// Use the mkvmerge binary at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_INSPECT_TIMEOUT,
        }
    }

    /// Locate mkvmerge, preferring `configured` over PATH.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        Ok(Self::new(tools::get_tool_path(MKVMERGE, configured)?))
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Inspector for MkvmergeInspector {
    fn identify(&self, path: &Path) -> Result<String> {
        let output = ToolCommand::new(&self.program)
            .arg("-J")
            .arg(path.to_string_lossy())
            .timeout(self.timeout)
            .execute_blocking()
            .map_err(|e| Error::parse_error(MKVMERGE, e.to_string()))?;

        Ok(output.stdout)
    }
}

/// Describe the first video track, e.g. `AVC High 10@L4.1 23.976fps`.
pub fn describe_video(mediainfo: &Path, path: &Path) -> Result<String> {
    let output = ToolCommand::new(mediainfo)
        .arg("--Inform=Video;%Format% %Format_Profile% %FrameRate%fps")
        .arg(path.to_string_lossy())
        .timeout(DEFAULT_INSPECT_TIMEOUT)
        .execute_blocking()
        .map_err(|e| Error::parse_error(MEDIAINFO, e.to_string()))?;

    Ok(output.stdout.trim().to_string())
}
