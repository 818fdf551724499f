//! Run configuration
//!
//! Loaded from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file. Every key
//! except the two folders has a default; validation happens here so a bad
//! configuration stops the run before any file is touched.

use crate::error::ConfigError;
use crate::normalize::{DegeneratePolicy, NormalizationConfig};
use image::ImageFormat;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Container format for normalized images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tif,
    Png,
    Jpg,
    Jpeg,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tif" | "tiff" => Ok(Self::Tif),
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            _ => Err(ConfigError::UnsupportedOutputFormat(s.to_string())),
        }
    }
}

impl OutputFormat {
    /// File extension written for this format
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tif => "tif",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }

    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Tif => ImageFormat::Tiff,
            Self::Png => ImageFormat::Png,
            Self::Jpg | Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The file as written by the user, before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    input_folder: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    #[serde(default = "default_output_format")]
    output_format: String,
    #[serde(default = "default_low_percentile")]
    downsample_percentile_low: f64,
    #[serde(default = "default_high_percentile")]
    downsample_percentile_high: f64,
    #[serde(default = "default_true")]
    save_input_histogram: bool,
    #[serde(default = "default_true")]
    save_output_histogram: bool,
    #[serde(default)]
    degenerate_fill: DegeneratePolicy,
}

fn default_output_format() -> String {
    "tif".to_string()
}

fn default_low_percentile() -> f64 {
    1.0
}

fn default_high_percentile() -> f64 {
    99.0
}

fn default_true() -> bool {
    true
}

/// Validated settings for one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub output_format: OutputFormat,
    pub normalization: NormalizationConfig,
    pub save_input_histogram: bool,
    pub save_output_histogram: bool,
}

impl Config {
    /// Read, parse and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file is missing, has an unknown
    /// extension, fails to parse, or holds invalid settings
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let raw: RawConfig = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Some("json") => serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            _ => return Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
        };

        debug!(?raw, "loaded config from {}", path.display());
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let input_folder = raw
            .input_folder
            .ok_or(ConfigError::MissingKey("input_folder"))?;
        if !input_folder.is_dir() {
            return Err(ConfigError::InputFolderMissing(input_folder));
        }

        let output_format = raw.output_format.parse::<OutputFormat>()?;

        let output_folder = raw
            .output_folder
            .ok_or(ConfigError::MissingKey("output_folder"))?;

        for (key, value) in [
            ("downsample_percentile_low", raw.downsample_percentile_low),
            ("downsample_percentile_high", raw.downsample_percentile_high),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::PercentileOutOfRange { key, value });
            }
        }

        Ok(Self {
            input_folder,
            output_folder,
            output_format,
            normalization: NormalizationConfig {
                low_percentile: raw.downsample_percentile_low,
                high_percentile: raw.downsample_percentile_high,
                degenerate: raw.degenerate_fill,
            },
            save_input_histogram: raw.save_input_histogram,
            save_output_histogram: raw.save_output_histogram,
        })
    }
}
