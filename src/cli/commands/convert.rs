//! Convert command implementation
//!
//! Loads the layered configuration, then converts each input in turn,
//! reporting per-file results and a final summary.

use super::shared::{
    expand_inputs, finish_session, load_settings, log_line, print_summary, report_failure,
    start_session,
};
use crate::cli::args::ConvertArgs;
use crate::config::ConverterConfig;
use crate::converter::MplusConverter;
use crate::models::{ConversionReport, ProcessingStats};
use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Convert command runner
///
/// 1. Set up the session log and logging
/// 2. Load settings file and CLI overrides
/// 3. Convert every input, halting at the first failure unless --keep-going
/// 4. Print and log the summary
pub fn run_convert(args: &ConvertArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let session_log = start_session(&args.session)?;

    info!("Starting Mplus converter");
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(args)?;
    debug!("Loaded configuration: {:?}", config);

    let inputs = expand_inputs(&args.inputs);
    info!("Converting {} files", inputs.len());

    let mut stats = ProcessingStats::default();
    for input in &inputs {
        let result = MplusConverter::new(input, &config).and_then(|converter| converter.process());

        match result {
            Ok(report) => {
                if !args.session.quiet {
                    print_report(&report);
                }
                log_line(
                    session_log.as_ref(),
                    &format!(
                        "OK {} -> {}, {} ({} rows)",
                        report.input.display(),
                        report.dat_file.display(),
                        report.inp_file.display(),
                        report.data_rows
                    ),
                );
                stats.record_success(report.data_rows);
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

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &ConvertArgs) -> Result<ConverterConfig> {
    let config = load_settings(args.config_file.as_deref())?;
    let config = apply_cli_overrides(config, args);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(mut config: ConverterConfig, args: &ConvertArgs) -> ConverterConfig {
    if args.no_empty_replacement {
        config = config.with_empty_replacement(None);
    } else if let Some(token) = &args.empty_replacement {
        config = config.with_empty_replacement(Some(token.clone()));
    }
    if args.ignore_non_numerical {
        config = config.with_ignore_non_numerical(true);
    }
    if let Some(analysis_type) = &args.analysis_type {
        config = config.with_analysis_type(analysis_type.clone());
    }
    if let Some(length) = args.max_name_length {
        config = config.with_max_name_length(length);
    }
    if let Some(length) = args.max_line_length {
        config = config.with_max_line_length(length);
    }
    if let Some(line_ending) = args.line_ending {
        config = config.with_line_ending(line_ending);
    }

    config
}

fn print_report(report: &ConversionReport) {
    println!(
        "{} {}",
        "Converted".bright_green().bold(),
        report.input.display()
    );
    println!(
        "  {} {} ({} rows)",
        "Data:".bright_cyan(),
        report.dat_file.display(),
        report.data_rows.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Control:".bright_cyan(),
        report.inp_file.display()
    );
    if !report.too_long_names.is_empty() {
        println!(
            "  {} {}",
            "Names too long:".bright_yellow(),
            report.too_long_names.join(", ")
        );
    }
    if !report.duplicate_names.is_empty() {
        println!(
            "  {} {}",
            "Names not unique:".bright_yellow(),
            report.duplicate_names.join(", ")
        );
    }
}
