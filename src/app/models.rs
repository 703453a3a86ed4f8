use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Represents the final configuration after merging defaults, presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub include: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub exclude_files: Vec<String>,
    pub output: PathBuf,
    pub respect_gitignore: bool,
}

/// A file that passed every filter during the scan.
#[derive(Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
}

impl FileEntry {
    /// Reads the whole file, replacing invalid UTF-8 sequences with U+FFFD.
    pub fn read_content(&self) -> Result<String> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Totals for one collection run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectSummary {
    pub written: usize,
    pub skipped: usize,
}
