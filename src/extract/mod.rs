// Extraction pipeline: discover files, parse each one, aggregate the results

pub mod scanner;

pub use scanner::Scanner;

use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::parser::{FileDoc, PythonParser};
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Dispatch};

/// Aggregated documentation for a source tree
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Documentation {
    /// Top-level document title
    pub title: String,
    /// File docs keyed by relative path, in discovery order
    pub files: IndexMap<String, FileDoc>,
}

impl Documentation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            files: IndexMap::new(),
        }
    }

    pub fn class_count(&self) -> usize {
        self.files.values().map(|f| f.classes.len()).sum()
    }

    pub fn function_count(&self) -> usize {
        self.files.values().map(|f| f.functions.len()).sum()
    }

    pub fn method_count(&self) -> usize {
        self.files.values().map(FileDoc::method_count).sum()
    }
}

/// Extracts docstrings and type information from every source file under a root
pub struct DocExtractor {
    config: Config,
    scanner: Scanner,
    parser: PythonParser,
    dispatch: Option<Dispatch>,
    progress: bool,
}

impl DocExtractor {
    /// Create an extractor for the tree at `root`
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::from_config(root, &config)?;
        let parser = PythonParser::new()?;

        Ok(Self {
            config,
            scanner,
            parser,
            dispatch: None,
            progress: false,
        })
    }

    /// Log through this handle instead of the caller's current default
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Show a progress bar while extracting
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// List the source files that would be processed
    pub fn source_files(&mut self) -> Result<Vec<PathBuf>> {
        self.logged(|this| this.scanner.discover())
    }

    /// Extract a single file. Read and parse failures are logged and give an
    /// empty `FileDoc`.
    pub fn extract_file(&mut self, path: &Path) -> FileDoc {
        self.logged(|this| this.extract_file_inner(path))
    }

    /// Extract every discovered file
    pub fn extract_all(&mut self) -> Result<Documentation> {
        self.logged(Self::extract_all_inner)
    }

    /// Extract every file and write the rendered document to `output_file`
    pub fn save_documentation(&mut self, output_file: &Path) -> Result<Documentation> {
        self.logged(|this| {
            let docs = this.extract_all_inner()?;
            output::write_document(&docs, output_file, this.config.output.format)?;
            info!("Documentation saved to {}", output_file.display());
            Ok(docs)
        })
    }

    fn extract_all_inner(&mut self) -> Result<Documentation> {
        info!("Scanning {}", self.scanner.root().display());
        let files = self.scanner.discover()?;
        info!("Found {} .{} files to process", files.len(), self.config.extension());

        let progress = if self.progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut docs = Documentation::new(self.config.project.title.clone());
        for path in &files {
            if let Some(ref pb) = progress {
                let msg = path.file_name().unwrap_or_default().to_string_lossy().to_string();
                pb.set_message(msg);
                pb.inc(1);
            }

            let file = self.extract_file_inner(path);
            docs.files.insert(file.relative_path.clone(), file);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Extraction complete");
        }

        info!(
            "Extracted {} classes, {} methods and {} functions from {} files",
            docs.class_count(),
            docs.method_count(),
            docs.function_count(),
            docs.files.len()
        );
        Ok(docs)
    }

    fn extract_file_inner(&mut self, path: &Path) -> FileDoc {
        let relative = self.scanner.relative_key(path);
        info!("Processing {}", path.display());

        match self.parser.parse_file(path, &relative) {
            Ok(file) => {
                debug!(
                    "{}: {} classes, {} functions",
                    relative,
                    file.classes.len(),
                    file.functions.len()
                );
                file
            }
            Err(e) => {
                error!("Error processing {}: {}", relative, e);
                FileDoc::new(relative)
            }
        }
    }

    /// Run `f` with this extractor's logger as the default, if it has one
    fn logged<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        match self.dispatch.clone() {
            Some(dispatch) => tracing::dispatcher::with_default(&dispatch, || f(self)),
            None => f(self),
        }
    }
}
