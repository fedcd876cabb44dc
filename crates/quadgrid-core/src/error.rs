//! Error types for the grid animator and text lookup.

use std::path::PathBuf;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Rejected grid configuration or container size.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A layout ratio outside the open interval (0, 1).
    #[error("{name} must be strictly between 0 and 1, got {value}")]
    InvalidRatio { name: &'static str, value: f32 },

    /// Container side length that is negative or not finite.
    #[error("container size must be finite and non-negative, got {0}")]
    InvalidContainerSize(f32),

    /// Rate-based animation speed that is not positive.
    #[error("animation speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),

    /// Duration-based animation length that is negative or not finite.
    #[error("animation duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),

    /// Completion tolerance that is not positive.
    #[error("completion tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f32),
}

/// Errors raised while loading a text lookup table.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// File I/O error.
    #[error("Failed to read lookup table '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TextError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
