use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Matches file names against filter entries.
///
/// Entries starting with `.` match as suffixes (`.py` matches `app.py`),
/// bare entries such as `Makefile` only match the exact name.
#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    suffixes: Vec<String>,
    exact: HashSet<String>,
}

impl NameMatcher {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::default();
        for entry in entries {
            let entry = entry.as_ref();
            if entry.is_empty() {
                continue;
            }
            if entry.starts_with('.') {
                matcher.suffixes.push(entry.to_string());
            } else {
                matcher.exact.insert(entry.to_string());
            }
        }
        matcher
    }

    pub fn matches(&self, name: &str) -> bool {
        self.exact.contains(name) || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty() && self.exact.is_empty()
    }
}

/// Decides which directories are pruned from the walk.
///
/// Plain entries compare against the directory name; entries with glob
/// metacharacters (`*.egg-info`) are matched as globs against the name.
#[derive(Debug, Clone)]
pub struct DirMatcher {
    names: HashSet<String>,
    globs: GlobSet,
}

impl DirMatcher {
    pub fn new(entries: &[String]) -> Result<Self> {
        let mut names = HashSet::new();
        let mut builder = GlobSetBuilder::new();
        for entry in entries {
            if entry.contains(['*', '?', '[', '{']) {
                builder.add(
                    Glob::new(entry)
                        .with_context(|| format!("Invalid directory pattern: {}", entry))?,
                );
            } else {
                names.insert(entry.clone());
            }
        }
        Ok(Self {
            names,
            globs: builder.build()?,
        })
    }

    pub fn matches(&self, dir_name: &str) -> bool {
        self.names.contains(dir_name) || self.globs.is_match(dir_name)
    }
}

/// The per-file decision: exact-name excludes, then extension excludes, then includes.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: NameMatcher,
    exclude_extensions: NameMatcher,
    exclude_files: HashSet<String>,
}

impl FileFilter {
    pub fn new(
        include: &[String],
        exclude_extensions: &[String],
        exclude_files: &[String],
    ) -> Self {
        Self {
            include: NameMatcher::new(include),
            exclude_extensions: NameMatcher::new(exclude_extensions),
            exclude_files: exclude_files.iter().cloned().collect(),
        }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        if self.exclude_files.contains(file_name) {
            return false;
        }
        if self.exclude_extensions.matches(file_name) {
            return false;
        }
        self.include.matches(file_name)
    }

    pub fn has_includes(&self) -> bool {
        !self.include.is_empty()
    }
}
