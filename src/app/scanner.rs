use crate::app::filters::{DirMatcher, FileFilter};
use crate::app::models::{FileEntry, RuntimeConfig};
use anyhow::Result;
use ignore::{Walk, WalkBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Scanner {
    root: PathBuf,
    dirs: DirMatcher,
    files: FileFilter,
    respect_gitignore: bool,
    skip: Option<PathBuf>,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            dirs: DirMatcher::new(&config.exclude_dirs)?,
            files: FileFilter::new(
                &config.include,
                &config.exclude_extensions,
                &config.exclude_files,
            ),
            respect_gitignore: config.respect_gitignore,
            skip: None,
        })
    }

    /// Never yield `path`. Used to keep the output file out of its own dump.
    pub fn skip_path(mut self, path: &Path) -> Self {
        self.skip = fs::canonicalize(path).ok();
        self
    }

    pub fn has_includes(&self) -> bool {
        self.files.has_includes()
    }

    /// Lazily walks the root, yielding accepted files in file-name order.
    /// Excluded directories are pruned before they are read.
    pub fn scan(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.walker().filter_map(move |result| match result {
            Ok(entry) => self.process_entry(entry.path()),
            Err(err) => {
                log::warn!("Error walking entry: {}", err);
                None
            }
        })
    }

    fn walker(&self) -> Walk {
        let dirs = self.dirs.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                !dirs.matches(&entry.file_name().to_string_lossy())
            });

        if self.respect_gitignore {
            builder.ignore(true).git_ignore(true).require_git(false);
        }

        builder.build()
    }

    fn process_entry(&self, path: &Path) -> Option<FileEntry> {
        if path == self.root || path.is_dir() {
            return None;
        }

        let name = path.file_name()?.to_string_lossy();
        if !self.files.accepts(&name) {
            return None;
        }

        if self.is_skipped(path) {
            log::debug!("Skipping output file {}", path.display());
            return None;
        }

        let relative = diff_paths(path, &self.root)?;

        Some(FileEntry {
            path: path.to_path_buf(),
            relative_path: relative.to_string_lossy().to_string(),
        })
    }

    fn is_skipped(&self, path: &Path) -> bool {
        match &self.skip {
            Some(skip) if path.file_name() == skip.file_name() => {
                fs::canonicalize(path).is_ok_and(|p| &p == skip)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::default_config;
    use tempfile::tempdir;

    fn create_tree(root: &Path) {
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/x")).unwrap();
        fs::create_dir_all(root.join("lib/node_modules")).unwrap();
        fs::create_dir_all(root.join("mypkg.egg-info")).unwrap();

        fs::write(root.join("src/app.py"), "print(1)").unwrap();
        fs::write(root.join("src/nested/util.rs"), "fn util() {}").unwrap();
        fs::write(root.join("node_modules/x/y.js"), "module.exports = 1").unwrap();
        fs::write(root.join("lib/node_modules/z.js"), "z").unwrap();
        fs::write(root.join("mypkg.egg-info/PKG-INFO.txt"), "meta").unwrap();
        fs::write(root.join("image.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
        fs::write(root.join("package-lock.json"), "{}").unwrap();
        fs::write(root.join("Dockerfile"), "FROM x").unwrap();
        fs::write(root.join("mymakefile"), "all:").unwrap();
    }

    fn relative_paths(scanner: &Scanner) -> Vec<String> {
        scanner.scan().map(|e| e.relative_path).collect()
    }

    #[test]
    fn test_scan_applies_default_filters() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();
        let found = relative_paths(&scanner);

        assert_eq!(
            found,
            vec![
                "Dockerfile".to_string(),
                Path::new("src").join("app.py").to_string_lossy().to_string(),
                Path::new("src/nested")
                    .join("util.rs")
                    .to_string_lossy()
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_excluded_dirs_are_pruned_at_any_depth() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();
        let found = relative_paths(&scanner);

        assert!(!found.iter().any(|p| p.contains("node_modules")));
        assert!(!found.iter().any(|p| p.contains("egg-info")));
    }

    #[test]
    fn test_exact_name_entries_do_not_match_suffixes() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();

        assert!(!relative_paths(&scanner).contains(&"mymakefile".to_string()));
    }

    #[test]
    fn test_hidden_and_gitignored_files_are_kept_by_default() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "ignored.py\n").unwrap();
        fs::write(temp.path().join("ignored.py"), "x = 1").unwrap();

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();

        assert_eq!(
            relative_paths(&scanner),
            vec![".gitignore".to_string(), "ignored.py".to_string()]
        );
    }

    #[test]
    fn test_respect_gitignore_without_repository() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "ignored.py\n").unwrap();
        fs::write(temp.path().join("ignored.py"), "x = 1").unwrap();
        fs::write(temp.path().join("kept.py"), "y = 2").unwrap();

        let mut config = default_config();
        config.respect_gitignore = true;
        let scanner = Scanner::new(temp.path().to_path_buf(), &config).unwrap();

        assert_eq!(
            relative_paths(&scanner),
            vec![".gitignore".to_string(), "kept.py".to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dirs_are_not_descended() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("real")).unwrap();
        fs::write(temp.path().join("real/a.py"), "a = 1").unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();

        assert_eq!(
            relative_paths(&scanner),
            vec![Path::new("real").join("a.py").to_string_lossy().to_string()]
        );
    }

    #[test]
    fn test_skip_path_excludes_output_file() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("all_project_code.txt");
        fs::write(&output, "previous run").unwrap();
        fs::write(temp.path().join("notes.txt"), "keep me").unwrap();

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config())
            .unwrap()
            .skip_path(&output);

        assert_eq!(relative_paths(&scanner), vec!["notes.txt".to_string()]);
    }

    #[test]
    fn test_scan_is_lazy_and_restartable_per_call() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let scanner = Scanner::new(temp.path().to_path_buf(), &default_config()).unwrap();
        let first = scanner.scan().next().map(|e| e.relative_path);

        assert_eq!(first.as_deref(), Some("Dockerfile"));
        assert_eq!(relative_paths(&scanner).len(), 3);
    }
}
