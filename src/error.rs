//! Error taxonomy
//!
//! `ConfigError` aborts a run before any file is touched. `DecodeError` and
//! `ProcessError` are per-file and end up as entries in the batch report.

use crate::types::{SampleType, Shape};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, reported before processing begins
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config file extension: {} (expected yaml, yml or json)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing required config key: {0}")]
    MissingKey(&'static str),

    #[error("Input folder not found at {}", .0.display())]
    InputFolderMissing(PathBuf),

    #[error("Unsupported output image format: {0}")]
    UnsupportedOutputFormat(String),

    #[error("{key} = {value} is outside [0, 100]")]
    PercentileOutOfRange { key: &'static str, value: f64 },

    #[error("Output folder {} would remove input folder {}", output.display(), input.display())]
    OverlappingFolders { input: PathBuf, output: PathBuf },

    #[error("Failed to prepare output folder {}: {source}", path.display())]
    OutputReset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to turn a file into a pixel buffer
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF decoding failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported sample type: {0}")]
    UnsupportedSampleType(String),

    #[error("Pixel data holds {actual} samples, shape {shape} needs {expected}")]
    ShapeMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
}

/// Shape/dtype combination the channel normalizer has no policy for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported image type with shape {shape} and dtype {sample_type}")]
pub struct Unsupported {
    pub shape: Shape,
    pub sample_type: SampleType,
}

/// Per-file failure recorded in the batch report
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    UnsupportedShape(#[from] Unsupported),

    #[error("Failed to save image {}: {error}", path.display())]
    Write { path: PathBuf, error: String },

    #[error("Failed to save histogram {}: {error}", path.display())]
    Histogram { path: PathBuf, error: String },
}

impl ProcessError {
    /// Short tag used in the run summary
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "load failed",
            Self::UnsupportedShape(_) => "unsupported",
            Self::Write { .. } => "save failed",
            Self::Histogram { .. } => "histogram failed",
        }
    }
}
