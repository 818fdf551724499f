//! Per-file outcomes and the run summary

use crate::error::ProcessError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension => write!(f, "unsupported extension"),
        }
    }
}

/// What happened to one input file
#[derive(Debug)]
pub enum FileOutcome {
    Processed { was_normalized: bool },
    Skipped(SkipReason),
    Failed(ProcessError),
}

#[derive(Debug)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub was_normalized: bool,
}

#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: ProcessError,
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Append-only record of one batch run
///
/// Processed and failed entries carry the path relative to the input root;
/// skipped entries carry the full path.
#[derive(Debug, Default)]
pub struct BatchReport {
    processed: Vec<ProcessedFile>,
    failed: Vec<FailedFile>,
    skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Processed { was_normalized } => {
                self.processed.push(ProcessedFile { path, was_normalized });
            }
            FileOutcome::Skipped(reason) => self.skipped.push(SkippedFile { path, reason }),
            FileOutcome::Failed(error) => self.failed.push(FailedFile { path, error }),
        }
    }

    /// Fold-friendly form of `record`
    #[must_use]
    pub fn with(mut self, (path, outcome): (PathBuf, FileOutcome)) -> Self {
        self.record(path, outcome);
        self
    }

    #[must_use]
    pub fn processed(&self) -> &[ProcessedFile] {
        &self.processed
    }

    #[must_use]
    pub fn failed(&self) -> &[FailedFile] {
        &self.failed
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len() + self.skipped.len()
    }

    /// Failure recorded for `path`, if any
    #[must_use]
    pub fn failure_for(&self, path: &Path) -> Option<&ProcessError> {
        self.failed
            .iter()
            .find(|f| f.path == path)
            .map(|f| &f.error)
    }

    pub fn print_summary(&self) {
        print!("{self}");
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Processing Summary ---")?;
        writeln!(f, "{:10}: {}", "Processed", self.processed.len())?;
        writeln!(f, "{:10}: {}", "Failed", self.failed.len())?;
        writeln!(f, "{:10}: {}", "Skipped", self.skipped.len())?;

        if !self.failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed Files:")?;
            for file in &self.failed {
                writeln!(
                    f,
                    "  - {} ({}: {})",
                    file.path.display(),
                    file.error.kind(),
                    file.error
                )?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped Files (unsupported extensions):")?;
            for file in &self.skipped {
                writeln!(f, "  - {}", file.path.display())?;
            }
        }
        Ok(())
    }
}
