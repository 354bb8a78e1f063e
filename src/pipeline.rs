//! Data pipeline: read, transform in order, reassemble.
//!
//! Row order matters since row 0 fixes both the column contract and the
//! header, so lines are always processed front to back.

use crate::config::ConverterConfig;
use crate::error::{ConverterError, Result};
use crate::models::{RowOutcome, TransformedData};
use crate::transformer::RowTransformer;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::path::Path;
use tracing::debug;

/// Decode raw input bytes
///
/// UTF-8 with the byte-order mark removed. Anything that is not valid
/// UTF-8 is read as Windows-1252, the usual encoding of desktop exports.
pub fn decode_input(bytes: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text.into_owned();
    }

    debug!("Input is not valid UTF-8, decoding as {}", WINDOWS_1252.name());
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Read every line of `path`
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(ConverterError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ConverterError::io(path, e))?;
    Ok(decode_input(&bytes).lines().map(str::to_string).collect())
}

/// Transform raw lines into data lines plus header names
pub fn transform_lines<S: AsRef<str>>(
    lines: &[S],
    config: &ConverterConfig,
) -> Result<TransformedData> {
    let mut transformer = RowTransformer::new(config);
    let mut data = TransformedData::default();

    for (row_index, line) in lines.iter().enumerate() {
        match transformer.transform_line(row_index, line.as_ref())? {
            RowOutcome::Header(names) => data.variable_names = names,
            RowOutcome::Data(text) => data.lines.push(text),
        }
    }

    debug!(
        "Transformed {} lines: {} data rows, {} variable names",
        lines.len(),
        data.lines.len(),
        data.variable_names.len()
    );

    Ok(data)
}

/// Read and transform a whole input file
pub fn run(path: &Path, config: &ConverterConfig) -> Result<TransformedData> {
    let lines = read_lines(path)?;
    transform_lines(&lines, config)
}
