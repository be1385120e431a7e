use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Top-level heading of the generated document
    pub title: String,
}

/// Source discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension to collect, without the leading dot
    pub extension: String,
    /// Glob patterns matched against paths relative to the scan root
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
    pub format: OutputFormat,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "pydocmd=debug"
    pub level: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// Parse a format name as given on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            title: "Project Documentation".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            exclude: vec![],
            follow_links: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("documentation.md"),
            format: OutputFormat::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file if it exists, otherwise return defaults.
    ///
    /// A file that exists but does not parse or validate is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        exclude: Vec<String>,
        format: Option<OutputFormat>,
        title: Option<String>,
        extension: Option<String>,
    ) {
        if let Some(out) = output {
            self.output.file = out;
        }

        if !exclude.is_empty() {
            self.scan.exclude.extend(exclude);
        }

        if let Some(fmt) = format {
            self.output.format = fmt;
        }

        if let Some(t) = title {
            self.project.title = t;
        }

        if let Some(ext) = extension {
            self.scan.extension = ext;
        }
    }

    /// Extension with any leading dot removed
    pub fn extension(&self) -> &str {
        self.scan.extension.trim_start_matches('.')
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extension().is_empty() {
            return Err(Error::config_validation("scan extension must not be empty"));
        }

        if self.output.file.as_os_str().is_empty() {
            return Err(Error::config_validation("output file must not be empty"));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern)?;
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::config_validation("logging level must not be empty"));
        }

        Ok(())
    }
}
