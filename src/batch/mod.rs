//! Batch pipeline
//!
//! Walks the input tree and takes every file through
//! `Discovered -> {Skipped | Loaded -> {Failed | Normalized -> WrittenOrSuppressed}}`.
//! Files are handled one at a time; each yields exactly one `FileOutcome`,
//! folded into the `BatchReport` returned at the end. A file recorded as
//! failed leaves no processed image behind.

pub mod layout;
pub mod report;

pub use layout::{OutputLayout, ResolvedRoots};
pub use report::{BatchReport, FileOutcome, SkipReason};

use crate::config::Config;
use crate::decode;
use crate::error::{ConfigError, ProcessError};
use crate::histogram::{HistogramRenderer, compute_histogram};
use crate::normalize::{self, Normalized};
use crate::pixels::PixelBuffer;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const INPUT_TITLE_NORMALIZED: &str = "Input Histogram (Original)";
const INPUT_TITLE_UNCHANGED: &str = "Image Histogram";
const OUTPUT_TITLE: &str = "Output Histogram (Normalized)";

/// Run a whole batch: reset the output area, then process every file
///
/// # Errors
///
/// Only configuration-level problems (an output root that cannot be reset
/// or that would remove the input) are returned. Per-file problems end up
/// in the report.
pub fn run(config: &Config, renderer: &dyn HistogramRenderer) -> Result<BatchReport, ConfigError> {
    let layout = OutputLayout::from_config(config);
    let roots = layout.prepare(&config.input_folder)?;

    let pipeline = Pipeline {
        config,
        layout: &layout,
        roots: &roots,
        renderer,
    };

    let report = WalkDir::new(&roots.input)
        .sort_by_file_name()
        .into_iter()
        // An output root nested in the input tree must not be re-read
        .filter_entry(|entry| !roots.is_output(entry.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to read directory entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| pipeline.process_entry(entry.path()))
        .fold(BatchReport::default(), BatchReport::with);

    Ok(report)
}

struct Pipeline<'a> {
    config: &'a Config,
    layout: &'a OutputLayout,
    roots: &'a ResolvedRoots,
    renderer: &'a dyn HistogramRenderer,
}

impl Pipeline<'_> {
    /// One file from discovery to its outcome, keyed by the path to report
    fn process_entry(&self, path: &Path) -> (PathBuf, FileOutcome) {
        let relative = path
            .strip_prefix(&self.roots.input)
            .unwrap_or(path)
            .to_path_buf();

        if !decode::is_supported_image(path) {
            // Full path, spelled the way the input folder was configured
            let full = self.config.input_folder.join(&relative);
            debug!("Skipping {}", full.display());
            return (full, FileOutcome::Skipped(SkipReason::UnsupportedExtension));
        }

        info!("Processing: {}", relative.display());

        let outcome = match self.process_file(path, &relative) {
            Ok(was_normalized) => FileOutcome::Processed { was_normalized },
            Err(e) => {
                warn!("{}: {e}", relative.display());
                FileOutcome::Failed(e)
            }
        };
        (relative, outcome)
    }

    /// Decode, normalize, then write whatever the configuration asks for.
    /// Returns whether percentile normalization ran.
    fn process_file(&self, path: &Path, relative: &Path) -> Result<bool, ProcessError> {
        let original = decode::open_image(path)?;
        debug!(
            "  Shape {} dtype {}",
            original.shape(),
            original.sample_type()
        );

        let normalized = normalize::convert_to_rgb8(&original, &self.config.normalization)?;
        let was_normalized = normalized.was_normalized();
        if was_normalized {
            info!("  Normalized {} to 8-bit", original.sample_type());
        }

        if let Some(hist_path) = self.layout.input_histogram_path(relative, was_normalized) {
            let title = if was_normalized {
                INPUT_TITLE_NORMALIZED
            } else {
                INPUT_TITLE_UNCHANGED
            };
            self.save_histogram(&original, title, &hist_path)?;
        }

        if !normalized.changed_depth() {
            info!("  8-bit image, no normalization needed; image file not saved");
            return Ok(was_normalized);
        }

        let output_path = self
            .layout
            .image_path(relative, self.config.output_format);
        self.save_image(&normalized, &output_path)?;

        if let Some(hist_path) = self.layout.output_histogram_path(relative) {
            if let Err(e) = self.save_histogram(&normalized.buffer, OUTPUT_TITLE, &hist_path) {
                remove_output(&output_path);
                return Err(e);
            }
        }

        Ok(was_normalized)
    }

    fn save_image(&self, normalized: &Normalized, path: &Path) -> Result<(), ProcessError> {
        let written = normalized.to_rgb_image().and_then(|image| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            image
                .save_with_format(path, self.config.output_format.image_format())
                .context("Failed to encode image")
        });

        match written {
            Ok(()) => {
                debug!("  Saved {}", path.display());
                Ok(())
            }
            Err(e) => {
                remove_output(path);
                Err(ProcessError::Write {
                    path: path.to_path_buf(),
                    error: format!("{e:#}"),
                })
            }
        }
    }

    fn save_histogram(
        &self,
        buffer: &PixelBuffer,
        title: &str,
        path: &Path,
    ) -> Result<(), ProcessError> {
        let histogram = compute_histogram(buffer, title);
        self.renderer
            .render(&histogram, path)
            .map_err(|e| ProcessError::Histogram {
                path: path.to_path_buf(),
                error: format!("{e:#}"),
            })?;
        debug!("  Histogram saved to {}", path.display());
        Ok(())
    }
}

/// Delete a processed image written for a file that ended up failing
fn remove_output(path: &Path) {
    if path.is_file() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove output {}: {e}", path.display());
        }
    }
}
