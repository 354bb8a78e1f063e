//! Application constants for the Mplus converter
//!
//! Default option values, Mplus keywords and file naming conventions used
//! throughout the converter.

// =============================================================================
// Output File Naming
// =============================================================================

/// Suffix appended to the sanitized input name for the data file
pub const DAT_SUFFIX: &str = ".dat";

/// Suffix appended to the sanitized input name for the control file
pub const INP_SUFFIX: &str = ".inp";

/// Suffix appended to the input name by the tidy conversions
pub const TIDY_SUFFIX: &str = "-conv.dat";

// =============================================================================
// Default Conversion Options
// =============================================================================

pub const DEFAULT_COLUMN_DELIMITER: char = '\t';
pub const DEFAULT_COLUMN_JOINER: &str = "\t";

/// Decimal point rewritten to the comma Mplus exports expect
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[(".", ",")];

pub const DEFAULT_EMPTY_REPLACEMENT: &str = "-999";

/// Mplus truncates variable names beyond this length
pub const DEFAULT_MAX_NAME_LENGTH: usize = 8;

/// Mplus rejects input lines wider than this
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

pub const DEFAULT_INDENT: &str = "\t\t";
pub const DEFAULT_ANALYSIS_TYPE: &str = "BASIC";

// =============================================================================
// Control File Keywords
// =============================================================================

pub mod keywords {
    pub const DATA: &str = "DATA:";
    pub const VARIABLE: &str = "VARIABLE:";
    pub const ANALYSIS: &str = "ANALYSIS:";

    pub const FILE_IS: &str = "FILE IS";
    pub const NAMES_ARE: &str = "NAMES ARE";
    pub const IDVARIABLE_IS: &str = "IDVARIABLE IS";
    pub const MISSING_ARE_ALL: &str = "MISSING ARE ALL";
    pub const TYPE_IS: &str = "TYPE IS";

    /// Mplus comment marker
    pub const COMMENT: &str = "!";
}

// =============================================================================
// Settings and Logging
// =============================================================================

/// Directory name under the user config dir holding the settings file
pub const SETTINGS_DIR_NAME: &str = "mplus-converter";
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Tracing target prefix used for the default log filter
pub const LOG_TARGET: &str = "mplus_converter";

pub const SESSION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
