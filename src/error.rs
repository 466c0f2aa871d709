//! Custom error types for tile-parity.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tile-parity library.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured image directory does not exist or is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Reference and optimized paths produced a different number of patches.
    #[error("{label}: patch count {reference} vs {optimized}")]
    PatchCountMismatch {
        label: String,
        reference: usize,
        optimized: usize,
    },

    /// Shape mismatch between a reference patch and its optimized counterpart.
    #[error("{label}: shape {expected:?} vs {actual:?}")]
    ShapeMismatch {
        label: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// An image reached the tolerance in aggregate mode.
    #[error("{name}: max_diff {max_diff:.6} >= {tolerance}")]
    ToleranceExceeded {
        name: String,
        max_diff: f64,
        tolerance: f64,
    },

    /// One or more images reached the tolerance in per-item mode.
    #[error("{}", ViolationList(.0))]
    ToleranceViolations(Vec<Violation>),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An image whose maximum difference reached the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// File name of the offending image.
    pub name: String,
    /// Observed maximum absolute difference.
    pub max_diff: f64,
}

struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} image(s) exceeded tolerance:", self.0.len())?;
        for violation in self.0 {
            write!(f, "\n  {}: {:.6}", violation.name, violation.max_diff)?;
        }
        Ok(())
    }
}

/// Result type alias for tile-parity operations.
pub type Result<T> = std::result::Result<T, Error>;
