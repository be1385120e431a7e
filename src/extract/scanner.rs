// Source file discovery

use crate::config::Config;
use crate::error::{Error, Result};
use glob::Pattern;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursively finds files with a given extension under a root directory
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    extension: String,
    exclude: Vec<Pattern>,
    follow_links: bool,
}

impl Scanner {
    /// Create a scanner for `*.{extension}` files under `root`
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
            exclude: Vec::new(),
            follow_links: false,
        }
    }

    /// Create a scanner from the `[scan]` config section
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        Ok(Self::new(root, config.extension())
            .with_exclude(&config.scan.exclude)?
            .with_follow_links(config.scan.follow_links))
    }

    /// Add glob patterns for paths to skip
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            self.exclude.push(Pattern::new(pattern)?);
        }
        Ok(self)
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover matching files, ordered by path
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(Error::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(Error::InvalidPath(self.root.clone()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(&self.extension)) {
                continue;
            }

            let relative = self.relative_key(path);
            if self.is_excluded(&relative) {
                debug!("Excluded {}", relative);
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    /// Path relative to the root with `/` separators
    pub fn relative_key(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches(relative))
    }
}
