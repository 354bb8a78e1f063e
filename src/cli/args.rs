//! Command-line argument definitions for the Mplus converter
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::LineEnding;
use crate::tidy::TidyMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the Mplus converter
///
/// Converts tab-delimited data exports into an Mplus data file and a
/// generated control file ready for editing.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mplus-converter",
    version,
    about = "Convert tab-delimited data exports into Mplus .dat and .inp files",
    long_about = "Converts tab-delimited exports (for example from SPSS) into an Mplus data file \
                  and a generated control file. The header row becomes the VARIABLE: NAMES list, \
                  decimal points are rewritten and blank cells are replaced by a missing-value \
                  token. Variable names that are too long or not unique are flagged in the \
                  generated control file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert exports into .dat/.inp pairs (main command)
    Convert(ConvertArgs),
    /// Apply a single cleanup to exports, writing <input>-conv.dat
    Tidy(TidyArgs),
}

impl Commands {
    pub fn session(&self) -> &SessionArgs {
        match self {
            Commands::Convert(args) => &args.session,
            Commands::Tidy(args) => &args.session,
        }
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input files to convert
    ///
    /// Glob patterns such as `exports/*.txt` are expanded, which matters on
    /// shells that do not expand them.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Path to settings file
    ///
    /// TOML settings file. If not specified, looks for
    /// <config dir>/mplus-converter/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to settings file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Token written for blank cells and declared as MISSING
    #[arg(
        long = "empty-replacement",
        value_name = "TOKEN",
        allow_hyphen_values = true,
        conflicts_with = "no_empty_replacement"
    )]
    pub empty_replacement: Option<String>,

    /// Leave blank cells untouched and declare no MISSING value
    #[arg(long = "no-empty-replacement")]
    pub no_empty_replacement: bool,

    /// Keep rows with non-numerical cells after the header instead of failing
    #[arg(long = "ignore-non-numerical")]
    pub ignore_non_numerical: bool,

    /// Value of the ANALYSIS: TYPE IS directive
    #[arg(long = "analysis-type", value_name = "TYPE")]
    pub analysis_type: Option<String>,

    /// Variable names longer than this are flagged
    #[arg(long = "max-name-length", value_name = "CHARS")]
    pub max_name_length: Option<usize>,

    /// Width at which generated control file lines wrap
    #[arg(long = "max-line-length", value_name = "CHARS")]
    pub max_line_length: Option<usize>,

    /// Line terminator for the generated files
    #[arg(long = "line-ending", value_enum)]
    pub line_ending: Option<LineEnding>,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the tidy command
#[derive(Debug, Clone, Parser)]
pub struct TidyArgs {
    /// Input files to tidy (glob patterns are expanded)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Cleanup to apply
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: TidyMode,

    /// TOML settings file; only `line_ending` affects tidy output
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Line terminator for the generated files
    #[arg(long = "line-ending", value_enum)]
    pub line_ending: Option<LineEnding>,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Options shared by every command that walks a list of inputs
#[derive(Debug, Clone, clap::Args)]
pub struct SessionArgs {
    /// Continue with the next input after a failure
    ///
    /// By default the run stops at the first file that fails.
    #[arg(short = 'k', long = "keep-going")]
    pub keep_going: bool,

    /// Wait for Enter before exiting when a file failed
    ///
    /// Useful when the converter is started by dropping files onto it and
    /// the console window would otherwise close immediately.
    #[arg(short = 'w', long = "wait")]
    pub wait: bool,

    /// Append a session log to this file
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl SessionArgs {
    /// Get log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_args() {
        let args = Args::try_parse_from([
            "mplus-converter",
            "convert",
            "a.txt",
            "b c.txt",
            "--empty-replacement",
            "-1",
            "--ignore-non-numerical",
            "--max-line-length",
            "60",
            "--line-ending",
            "crlf",
            "-k",
            "-vv",
        ])
        .unwrap();

        let Some(Commands::Convert(convert)) = args.command else {
            panic!("Expected convert command");
        };
        assert_eq!(convert.inputs, vec!["a.txt", "b c.txt"]);
        assert_eq!(convert.empty_replacement.as_deref(), Some("-1"));
        assert!(convert.ignore_non_numerical);
        assert_eq!(convert.max_line_length, Some(60));
        assert_eq!(convert.line_ending, Some(LineEnding::CrLf));
        assert!(convert.session.keep_going);
        assert_eq!(convert.session.get_log_level(), "debug");
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Args::try_parse_from(["mplus-converter", "convert"]).is_err());
    }

    #[test]
    fn test_empty_replacement_flags_conflict() {
        let result = Args::try_parse_from([
            "mplus-converter",
            "convert",
            "a.txt",
            "--empty-replacement",
            "-1",
            "--no-empty-replacement",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["mplus-converter", "convert", "a.txt", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tidy_args() {
        let args =
            Args::try_parse_from(["mplus-converter", "tidy", "raw.txt", "--mode", "decimal", "-w"])
                .unwrap();
        let Some(command) = args.command else {
            panic!("Expected a command");
        };
        assert!(command.session().wait);
        let Commands::Tidy(tidy) = command else {
            panic!("Expected tidy command");
        };
        assert_eq!(tidy.mode, TidyMode::Decimal);
        assert_eq!(tidy.session.get_log_level(), "warn");
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["mplus-converter"]).unwrap();
        assert!(args.command.is_none());
    }
}
