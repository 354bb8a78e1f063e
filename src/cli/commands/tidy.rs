//! Tidy command implementation

use super::shared::{
    expand_inputs, finish_session, load_settings, log_line, print_summary, report_failure,
    start_session,
};
use crate::cli::args::TidyArgs;
use crate::config::ConverterConfig;
use crate::models::ProcessingStats;
use crate::tidy::tidy_file;
use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;
use tracing::info;

/// Tidy command runner, same halt/continue policy as convert
pub fn run_tidy(args: &TidyArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let session_log = start_session(&args.session)?;

    let config = load_configuration(args)?;

    let inputs = expand_inputs(&args.inputs);
    info!("Tidying {} files ({:?})", inputs.len(), args.mode);

    let mut stats = ProcessingStats::default();
    for input in &inputs {
        match tidy_file(input, args.mode, &config) {
            Ok(tidied) => {
                if !args.session.quiet {
                    println!(
                        "{} {} -> {}",
                        "Tidied".bright_green().bold(),
                        input.display(),
                        tidied.out_file.display()
                    );
                }
                log_line(
                    session_log.as_ref(),
                    &format!(
                        "OK {} -> {} ({} rows)",
                        input.display(),
                        tidied.out_file.display(),
                        tidied.lines
                    ),
                );
                stats.record_success(tidied.lines);
            }
            Err(e) => {
                report_failure(input, &e, session_log.as_ref());
                stats.record_failure();
                if !args.session.keep_going {
                    break;
                }
            }
        }
    }

    stats.processing_time = start_time.elapsed();
    if !args.session.quiet {
        print_summary(&stats);
    }
    finish_session(session_log, &stats)?;

    Ok(stats)
}

/// Settings file first, then `--line-ending`
pub fn load_configuration(args: &TidyArgs) -> Result<ConverterConfig> {
    let mut config = load_settings(args.config_file.as_deref())?;
    if let Some(line_ending) = args.line_ending {
        config = config.with_line_ending(line_ending);
    }
    config.validate().context("Invalid configuration")?;

    Ok(config)
}
