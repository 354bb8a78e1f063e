//! Error handling for conversion operations.
//!
//! Every variant is terminal for the file being converted. The structural
//! variants carry their diagnostic fields so callers can inspect them
//! without parsing the rendered message.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("The file does not exist: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("The {kind} file already exists, please delete it first: {}", path.display())]
    OutputAlreadyExists { kind: OutputKind, path: PathBuf },

    #[error("Line: {line_number} has {found} columns but should be {expected}")]
    ColumnCountMismatch {
        line_number: usize,
        found: usize,
        expected: usize,
    },

    #[error(
        "There are non numerical characters on another line than the first. \
         Row: {row_index}, Line: {line_number}, Column: {column_index}, \
         Match: \"{first_match}\", Context: \"{context}\""
    )]
    UnexpectedNonNumericalData {
        /// 1-based index among data rows
        row_index: usize,
        /// 1-based line number in the source file
        line_number: usize,
        /// 1-based index of the first offending column
        column_index: usize,
        /// The full original line
        context: String,
        /// The first literal non-numerical substring
        first_match: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error in {}: {reason}", path.display())]
    Settings { path: PathBuf, reason: String },
}

/// Which artifact collided with an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Dat,
    Inp,
    Tidy,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Dat => write!(f, ".dat"),
            OutputKind::Inp => write!(f, ".inp"),
            OutputKind::Tidy => write!(f, "-conv.dat"),
        }
    }
}

impl ConverterError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn settings(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
