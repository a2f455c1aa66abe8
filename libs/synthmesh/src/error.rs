//! # Synthmesh Errors
//!
//! Error types for mesh generation, export and import.
//!
//! Degenerate geometry (a point sitting on an axis or at a center) is never
//! an error: the field synthesizer handles it through explicit fallback
//! values. Errors are reserved for invalid configuration, structural
//! inconsistencies and I/O.

use config::constants::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating, writing or reading a mesh.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Shape extents or geometric parameters were rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Cells, sampled field kinds or active-array metadata do not fit the
    /// declared layout, or the grid is too large for `u32` point indices.
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// A field array does not have one entry per point.
    #[error("Field '{name}' has {actual} entries, expected {expected}")]
    FieldMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Reading or writing a mesh file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mesh file could not be parsed.
    #[error("Malformed VTU: {message}")]
    Malformed { message: String },
}

impl SynthError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a malformed-file error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for synthmesh operations.
pub type SynthResult<T> = Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SynthError::from(ConfigError::ExtentTooSmall {
            axis: "radial",
            extent: 1,
        });
        assert!(err.to_string().contains("radial"));

        let err = SynthError::FieldMismatch {
            name: "Pressure".to_string(),
            expected: 8,
            actual: 7,
        };
        assert!(err.to_string().contains("Pressure"));
        assert!(err.to_string().contains("expected 8"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SynthError::io("/tmp/out.vtu", source);
        assert!(err.to_string().contains("/tmp/out.vtu"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SynthError>();
    }
}
