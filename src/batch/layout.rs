//! Output directory layout
//!
//! ```text
//! <output>/processed_images/<relative>.<format>
//! <output>/input_histograms/<relative>_histogram.png        (8-bit inputs)
//! <output>/input_histograms/<relative>_input_histogram.png  (normalized inputs)
//! <output>/output_histograms/<relative>_output_histogram.png
//! ```

use crate::config::{Config, OutputFormat};
use crate::error::ConfigError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PROCESSED_DIR: &str = "processed_images";
pub const INPUT_HISTOGRAM_DIR: &str = "input_histograms";
pub const OUTPUT_HISTOGRAM_DIR: &str = "output_histograms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub processed: PathBuf,
    pub input_histograms: Option<PathBuf>,
    pub output_histograms: Option<PathBuf>,
}

/// `relative` with its extension replaced by `suffix`
fn with_suffix(relative: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = relative
        .file_stem()
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    name.push(suffix);
    relative.with_file_name(name)
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.exists() {
        path.canonicalize()
    } else {
        std::path::absolute(path)
    }
}

/// Input and output roots after `prepare`, both canonical
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoots {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ResolvedRoots {
    /// Whether `path` lies in the output tree
    #[inline]
    #[must_use]
    pub fn is_output(&self, path: &Path) -> bool {
        path.starts_with(&self.output)
    }
}

impl OutputLayout {
    #[must_use]
    pub fn new(root: &Path, save_input_histogram: bool, save_output_histogram: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            processed: root.join(PROCESSED_DIR),
            input_histograms: save_input_histogram.then(|| root.join(INPUT_HISTOGRAM_DIR)),
            output_histograms: save_output_histogram.then(|| root.join(OUTPUT_HISTOGRAM_DIR)),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.output_folder,
            config.save_input_histogram,
            config.save_output_histogram,
        )
    }

    /// Wipe the output root and recreate the enabled subdirectories
    ///
    /// Runs once before the walk. Calling it again gives the same empty
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns `OverlappingFolders` if removing the output root would remove
    /// `input_root`, and `OutputReset` on filesystem errors
    pub fn prepare(&self, input_root: &Path) -> Result<ResolvedRoots, ConfigError> {
        let reset_error = |source| ConfigError::OutputReset {
            path: self.root.clone(),
            source,
        };

        let input_abs = absolute(input_root).map_err(reset_error)?;
        let output_abs = absolute(&self.root).map_err(reset_error)?;
        if input_abs.starts_with(&output_abs) {
            return Err(ConfigError::OverlappingFolders {
                input: input_root.to_path_buf(),
                output: self.root.clone(),
            });
        }

        if self.root.exists() {
            info!("Removing previous output at {}", self.root.display());
            std::fs::remove_dir_all(&self.root).map_err(reset_error)?;
        }

        let dirs = std::iter::once(&self.processed)
            .chain(self.input_histograms.as_ref())
            .chain(self.output_histograms.as_ref());
        for dir in dirs {
            std::fs::create_dir_all(dir).map_err(reset_error)?;
        }

        // The root exists now, so this resolves `..` and symlinks like the input
        Ok(ResolvedRoots {
            input: input_abs,
            output: absolute(&self.root).map_err(reset_error)?,
        })
    }

    /// Where the normalized image for `relative` is written
    #[must_use]
    pub fn image_path(&self, relative: &Path, format: OutputFormat) -> PathBuf {
        self.processed.join(relative.with_extension(format.extension()))
    }

    /// Input histogram path, `None` when input histograms are disabled
    #[must_use]
    pub fn input_histogram_path(&self, relative: &Path, was_normalized: bool) -> Option<PathBuf> {
        let suffix = if was_normalized {
            "_input_histogram.png"
        } else {
            "_histogram.png"
        };
        self.input_histograms
            .as_ref()
            .map(|dir| dir.join(with_suffix(relative, suffix)))
    }

    /// Output histogram path, `None` when output histograms are disabled
    #[must_use]
    pub fn output_histogram_path(&self, relative: &Path) -> Option<PathBuf> {
        self.output_histograms
            .as_ref()
            .map(|dir| dir.join(with_suffix(relative, "_output_histogram.png")))
    }
}
