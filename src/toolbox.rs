//! Resolved external tools for one CLI run.

use anyhow::{Context, Result};
use mkvkit_av::tools::{get_tool_path, MEDIAINFO, MKVEXTRACT, MKVMERGE, MKVPROPEDIT};
use mkvkit_av::{ContainerModel, MkvmergeInspector, ToolCommand};
use std::path::{Path, PathBuf};

use crate::config::ToolsConfig;

/// Looks up tools from the config or PATH and runs them with the
/// configured timeouts.
#[derive(Debug, Clone)]
pub struct Toolbox {
    tools: ToolsConfig,
    dry_run: bool,
}

impl Toolbox {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            tools: tools.clone(),
            dry_run: false,
        }
    }

    /// Print commands instead of running them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Path of `name`, configured path first.
    ///
    /// In dry-run mode a missing tool resolves to its bare name so the
    /// printed commands stay complete.
    pub fn require(&self, name: &str) -> Result<PathBuf> {
        match get_tool_path(name, self.tools.path_for(name)) {
            Ok(path) => Ok(path),
            Err(e) if self.dry_run => {
                tracing::debug!("{}, printing bare name", e);
                Ok(PathBuf::from(name))
            }
            Err(e) => Err(e).with_context(|| format!("{} is required; is it installed?", name)),
        }
    }

    pub fn mkvextract(&self) -> Result<PathBuf> {
        self.require(MKVEXTRACT)
    }

    pub fn mkvpropedit(&self) -> Result<PathBuf> {
        self.require(MKVPROPEDIT)
    }

    pub fn mediainfo(&self) -> Result<PathBuf> {
        self.require(MEDIAINFO)
    }

    pub fn inspector(&self) -> Result<MkvmergeInspector> {
        Ok(MkvmergeInspector::new(self.require(MKVMERGE)?)
            .with_timeout(self.tools.inspect_timeout()))
    }

    /// Build the model of `path`.
    pub fn open(&self, inspector: &MkvmergeInspector, path: &Path) -> Result<ContainerModel> {
        ContainerModel::open(path, inspector)
            .with_context(|| format!("Failed to inspect {}", path.display()))
    }

    /// Run `cmd`, or print it in dry-run mode.
    pub fn run(&self, mut cmd: ToolCommand) -> Result<()> {
        if self.dry_run {
            println!("{}", cmd);
            return Ok(());
        }

        cmd.timeout(self.tools.command_timeout());
        let output = cmd.execute_blocking()?;
        tracing::trace!("{}", output.stdout.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_does_not_execute() {
        let toolbox = Toolbox::new(&ToolsConfig::default()).dry_run(true);
        let mut cmd = ToolCommand::new("nonexistent_tool_12345");
        cmd.arg("x");
        assert!(toolbox.run(cmd).is_ok());
    }

    #[test]
    fn test_dry_run_falls_back_to_bare_name() {
        let mut tools = ToolsConfig::default();
        tools.mkvpropedit_path = Some(PathBuf::from("/nonexistent/mkvpropedit"));
        let toolbox = Toolbox::new(&tools).dry_run(true);
        // Either found on PATH or the bare name.
        let path = toolbox.mkvpropedit().unwrap();
        assert!(path.ends_with("mkvpropedit"));
    }

    #[test]
    fn test_run_reports_failure() {
        let toolbox = Toolbox::new(&ToolsConfig::default());
        assert!(toolbox.run(ToolCommand::new("nonexistent_tool_12345")).is_err());
    }

    #[test]
    fn test_configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("mkvextract");
        std::fs::write(&fake, b"").unwrap();

        let mut tools = ToolsConfig::default();
        tools.mkvextract_path = Some(fake.clone());
        assert_eq!(Toolbox::new(&tools).mkvextract().unwrap(), fake);
    }
}
