use std::path::PathBuf;
use thiserror::Error;

/// pydocmd error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pydocmd operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parser error
    pub fn parser(msg: impl Into<String>) -> Self {
        Error::Parser(msg.into())
    }

    /// Create a logging setup error
    pub fn logging(msg: impl Into<String>) -> Self {
        Error::Logging(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_path_not_found_display() {
        let err = Error::PathNotFound(PathBuf::from("/some/path"));
        assert_eq!(err.to_string(), "Path not found: /some/path");
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("/foo/bar.py", "syntax error at line 3, column 1");
        assert!(err.to_string().contains("/foo/bar.py"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("extension must not be empty");
        assert_eq!(
            err.to_string(),
            "Config validation error: extension must not be empty"
        );
    }

    #[test]
    fn test_parser_error() {
        let err = Error::parser("language version mismatch");
        assert_eq!(err.to_string(), "Parser error: language version mismatch");
    }

    #[test]
    fn test_logging_error() {
        let err = Error::logging("invalid filter");
        assert_eq!(err.to_string(), "Logging setup error: invalid filter");
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_glob_error_converts() {
        let pattern_err = glob::Pattern::new("[").unwrap_err();
        let err: Error = pattern_err.into();
        assert!(err.to_string().starts_with("Glob pattern error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
