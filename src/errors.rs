//! Shared error types for repodoctor.
//!
//! Only the collaborators that touch the outside world (file walking,
//! parsing, configuration, history) return these errors. The dependency
//! graph, cycle detection, layer validation and scoring are total functions
//! and never fail.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for repodoctor operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message} ({})", path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source parsing errors
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error in {}: {message}", path.display())]
    Configuration { path: PathBuf, message: String },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Directory walking errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a parse error for a source file
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error for a config file
    pub fn configuration(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_path() {
        let err = Error::parse("src/lib.rs", "expected item");
        assert_eq!(err.to_string(), "Parse error in src/lib.rs: expected item");
    }

    #[test]
    fn test_json_errors_convert_with_question_mark() {
        fn parse(raw: &str) -> Result<u32> {
            Ok(serde_json::from_str(raw)?)
        }

        assert_eq!(parse("7").unwrap(), 7);
        assert!(matches!(parse("seven"), Err(Error::Json(_))));
    }

    #[test]
    fn test_file_system_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_system("Failed to read file", "a/b.rs", io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("a/b.rs"));
    }
}
