//! Configuration management and validation.
//!
//! Provides the immutable option set shared by every conversion component,
//! plus the TOML settings file that can override the defaults.

use crate::constants::{
    DEFAULT_ANALYSIS_TYPE, DEFAULT_COLUMN_DELIMITER, DEFAULT_COLUMN_JOINER,
    DEFAULT_EMPTY_REPLACEMENT, DEFAULT_INDENT, DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_NAME_LENGTH,
    DEFAULT_REPLACEMENTS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::{ConverterError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A literal find/replace pair applied to every data cell
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    pub find: String,
    pub replace: String,
}

impl Replacement {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Apply this replacement to a cell
    pub fn apply(&self, cell: &str) -> String {
        // str::replace with an empty pattern inserts between every char
        if self.find.is_empty() {
            return cell.to_string();
        }
        cell.replace(&self.find, &self.replace)
    }
}

/// Line terminator written to both output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Platform default (CRLF on Windows, LF elsewhere)
    #[default]
    Native,
    Lf,
    #[value(name = "crlf")]
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for a conversion run
///
/// Built once, validated, then only ever borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Character splitting input lines into columns
    pub column_delimiter: char,

    /// String placed between columns in the `.dat` output
    pub column_joiner: String,

    /// Ordered substitutions applied to each data cell
    pub replacements: Vec<Replacement>,

    /// Token written for blank cells, `None` leaves them untouched
    pub empty_replacement: Option<String>,

    /// Variable names longer than this are reported in the control file
    pub max_name_length: usize,

    /// Width at which generated control file lines are wrapped
    pub max_line_length: usize,

    pub line_ending: LineEnding,

    /// Indentation for statements inside a control file section
    pub indent: String,

    /// Value of the `ANALYSIS: TYPE IS` directive
    pub analysis_type: String,

    /// Treat non-numerical cells on data rows as data instead of failing
    pub ignore_non_numerical: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            column_delimiter: DEFAULT_COLUMN_DELIMITER,
            column_joiner: DEFAULT_COLUMN_JOINER.to_string(),
            replacements: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(find, replace)| Replacement::new(*find, *replace))
                .collect(),
            empty_replacement: Some(DEFAULT_EMPTY_REPLACEMENT.to_string()),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_ending: LineEnding::default(),
            indent: DEFAULT_INDENT.to_string(),
            analysis_type: DEFAULT_ANALYSIS_TYPE.to_string(),
            ignore_non_numerical: false,
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_delimiter(mut self, delimiter: char) -> Self {
        self.column_delimiter = delimiter;
        self
    }

    pub fn with_column_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.column_joiner = joiner.into();
        self
    }

    pub fn with_replacements(mut self, replacements: Vec<Replacement>) -> Self {
        self.replacements = replacements;
        self
    }

    /// Set the blank-cell token, `None` disables blank-cell replacement
    pub fn with_empty_replacement(mut self, token: Option<String>) -> Self {
        self.empty_replacement = token;
        self
    }

    pub fn with_max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = length;
        self
    }

    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = analysis_type.into();
        self
    }

    pub fn with_ignore_non_numerical(mut self, ignore: bool) -> Self {
        self.ignore_non_numerical = ignore;
        self
    }

    /// The line terminator as text
    pub fn newline(&self) -> &'static str {
        self.line_ending.as_str()
    }

    pub fn has_empty_replacement(&self) -> bool {
        self.empty_replacement.is_some()
    }

    /// Validate the option set
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(ConverterError::invalid_argument(
                "max_line_length must be greater than 0",
            ));
        }

        if self.analysis_type.trim().is_empty() {
            return Err(ConverterError::invalid_argument(
                "analysis_type must not be empty",
            ));
        }

        if self.empty_replacement.as_deref().is_some_and(str::is_empty) {
            return Err(ConverterError::invalid_argument(
                "empty_replacement must not be an empty string, disable it instead",
            ));
        }

        Ok(())
    }

    /// Default settings file location (`<config dir>/mplus-converter/config.toml`)
    pub fn default_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load defaults overlaid with a settings file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConverterError::io(path, e))?;
        let settings = SettingsFile::parse(&contents)
            .map_err(|e| ConverterError::settings(path, e.to_string()))?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings.apply(Self::default()))
    }
}

/// On-disk settings, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub column_delimiter: Option<char>,
    pub column_joiner: Option<String>,
    pub replacements: Option<Vec<Replacement>>,
    /// An empty string disables blank-cell replacement
    pub empty_replacement: Option<String>,
    pub max_name_length: Option<usize>,
    pub max_line_length: Option<usize>,
    pub line_ending: Option<LineEnding>,
    pub indent: Option<String>,
    pub analysis_type: Option<String>,
    pub ignore_non_numerical: Option<bool>,
}

impl SettingsFile {
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Overlay the keys present in this file onto `config`
    pub fn apply(self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(delimiter) = self.column_delimiter {
            config.column_delimiter = delimiter;
        }
        if let Some(joiner) = self.column_joiner {
            config.column_joiner = joiner;
        }
        if let Some(replacements) = self.replacements {
            config.replacements = replacements;
        }
        if let Some(token) = self.empty_replacement {
            config.empty_replacement = (!token.is_empty()).then_some(token);
        }
        if let Some(length) = self.max_name_length {
            config.max_name_length = length;
        }
        if let Some(length) = self.max_line_length {
            config.max_line_length = length;
        }
        if let Some(line_ending) = self.line_ending {
            config.line_ending = line_ending;
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if let Some(analysis_type) = self.analysis_type {
            config.analysis_type = analysis_type;
        }
        if let Some(ignore) = self.ignore_non_numerical {
            config.ignore_non_numerical = ignore;
        }
        config
    }
}
