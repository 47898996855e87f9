//! Error types for the Jsonmap core library
//!
//! Every failure aborts the whole mapping call: there are no per-field partial
//! results. Field specifications that tolerate absence (`required: false` or a
//! `defaultValue`) prevent [`Error::InvalidPath`] from being raised at all.

use crate::mapping::SpecError;
use thiserror::Error;

/// Main error type for Jsonmap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed field specification, raised before any path resolution
    #[error(transparent)]
    InvalidSpec(#[from] SpecError),

    /// A required path segment could not be found in the source value
    #[error("Invalid path {path} ({segment})")]
    InvalidPath {
        /// Full dotted path as written in the template
        path: String,
        /// The segment that was missing
        segment: String,
    },

    /// A caller-supplied formatting function failed
    #[error("Formatting failed at {path}: {source}")]
    Formatting {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            segment: segment.into(),
        }
    }

    /// Whether this error comes from a malformed field specification
    pub fn is_invalid_spec(&self) -> bool {
        matches!(self, Self::InvalidSpec(_))
    }

    /// Whether this error comes from a missing required path
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = Error::invalid_path("a.b.c", "b");
        assert_eq!(err.to_string(), "Invalid path a.b.c (b)");
        assert!(err.is_invalid_path());
        assert!(!err.is_invalid_spec());
    }

    #[test]
    fn test_spec_error_is_transparent() {
        let err: Error = SpecError::UnknownProperty("property".to_string()).into();
        assert_eq!(err.to_string(), "Invalid property property");
        assert!(err.is_invalid_spec());
    }

    #[test]
    fn test_formatting_error_keeps_source() {
        let err = Error::Formatting {
            path: "a.b".to_string(),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.to_string(), "Formatting failed at a.b: boom");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "no runtime").into();
        assert_eq!(err.to_string(), "IO error: no runtime");
        assert!(!err.is_invalid_path());
    }
}
