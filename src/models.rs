//! Core data structures for conversion results.
//!
//! Defines the per-row classification outcome, the per-file conversion
//! report and the per-run statistics shown by the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Result of classifying and transforming one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The header row, carrying its variable names; dropped from the output
    Header(Vec<String>),
    /// A data row, re-joined with substitutions applied
    Data(String),
}

/// Output of the data pipeline for one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformedData {
    /// Data lines in input order, header excluded
    pub lines: Vec<String>,
    /// Names from the header row, empty when the file had no header
    pub variable_names: Vec<String>,
}

impl TransformedData {
    /// Render the `.dat` file contents
    pub fn render(&self, newline: &str) -> String {
        self.lines.join(newline)
    }
}

/// What a single successful conversion produced
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub dat_file: PathBuf,
    pub inp_file: PathBuf,
    pub data_rows: usize,
    pub variable_names: Vec<String>,
    pub too_long_names: Vec<String>,
    pub duplicate_names: Vec<String>,
}

impl ConversionReport {
    /// Whether the control file carries any diagnostic comments
    pub fn has_name_warnings(&self) -> bool {
        !self.too_long_names.is_empty() || !self.duplicate_names.is_empty()
    }
}

/// Processing statistics for a CLI run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub processing_time: Duration,
}

impl ProcessingStats {
    pub fn record_success(&mut self, rows: usize) {
        self.files_processed += 1;
        self.total_rows += rows;
    }

    pub fn record_failure(&mut self) {
        self.files_failed += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}
