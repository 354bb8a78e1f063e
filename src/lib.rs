//! Mplus Converter Library
//!
//! Converts tab-delimited data exports into the two files an Mplus analysis
//! starts from: a cleaned data file (`.dat`) and a generated control file
//! (`.inp`).
//!
//! This library provides tools for:
//! - Telling the header row apart from numerical data rows
//! - Validating that every row has the header's column count
//! - Rewriting cells (decimal separators, blank-cell tokens)
//! - Generating the control file with wrapped variable lists and
//!   diagnostics for over-long or duplicated variable names
//! - Companion cleanups for exports that only need separators fixed
//!
//! ```no_run
//! use mplus_converter::{ConverterConfig, MplusConverter};
//!
//! let config = ConverterConfig::default();
//! let converter = MplusConverter::new("survey export.txt", &config)?;
//! let report = converter.process()?;
//! println!("wrote {}", report.inp_file.display());
//! # Ok::<(), mplus_converter::ConverterError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod constants;
pub mod control_file;
pub mod converter;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod tidy;
pub mod transformer;
pub mod wrap;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ConverterConfig, LineEnding, Replacement};
pub use converter::MplusConverter;
pub use error::{ConverterError, OutputKind, Result};
pub use models::{ConversionReport, RowOutcome};
