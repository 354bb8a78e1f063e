//! Command implementations for the Mplus converter CLI
//!
//! Each command lives in its own module; `shared` holds the input
//! expansion, session handling and reporting they have in common.

pub mod convert;
pub mod shared;
pub mod tidy;

use crate::cli::args::Commands;
use crate::models::ProcessingStats;
use anyhow::Result;

/// Main command runner
///
/// Dispatches to the handler for the selected subcommand.
pub fn run(command: &Commands) -> Result<ProcessingStats> {
    match command {
        Commands::Convert(convert_args) => convert::run_convert(convert_args),
        Commands::Tidy(tidy_args) => tidy::run_tidy(tidy_args),
    }
}
