//! Single-file cleanup conversions writing `<input>-conv.dat`.
//!
//! These predate the full converter and are kept for exports that only
//! need their separators fixed up before manual editing.

use crate::config::ConverterConfig;
use crate::constants::TIDY_SUFFIX;
use crate::converter::write_file;
use crate::error::{ConverterError, OutputKind, Result};
use crate::pipeline::read_lines;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::info;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Which cleanup to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TidyMode {
    /// Collapse every whitespace run into a single tab
    Whitespace,
    /// Rewrite decimal points as commas
    Decimal,
}

impl TidyMode {
    pub fn apply(&self, line: &str) -> String {
        match self {
            TidyMode::Whitespace => WHITESPACE_RUN
                .replace_all(line, "\t")
                .trim_matches(['\t', ' '])
                .to_string(),
            TidyMode::Decimal => line.replace('.', ","),
        }
    }
}

/// `<input>-conv.dat` next to the input
pub fn tidy_output_path(in_file: &Path) -> PathBuf {
    let mut name = in_file.as_os_str().to_os_string();
    name.push(TIDY_SUFFIX);
    PathBuf::from(name)
}

/// Result of one tidy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidiedFile {
    pub out_file: PathBuf,
    pub lines: usize,
}

/// Apply `mode` to every line of `in_file`
pub fn tidy_file(in_file: &Path, mode: TidyMode, config: &ConverterConfig) -> Result<TidiedFile> {
    let out_file = tidy_output_path(in_file);
    if out_file.exists() {
        return Err(ConverterError::OutputAlreadyExists {
            kind: OutputKind::Tidy,
            path: out_file,
        });
    }

    let lines = read_lines(in_file)?;
    let tidied: Vec<String> = lines.iter().map(|line| mode.apply(line)).collect();
    write_file(&out_file, &tidied.join(config.newline()))?;

    info!(
        "Tidied {} lines ({:?}) into {}",
        tidied.len(),
        mode,
        out_file.display()
    );
    Ok(TidiedFile {
        out_file,
        lines: tidied.len(),
    })
}
