//! Shared components for CLI commands
//!
//! Input expansion, session bootstrap, per-file reporting and the final
//! summary used by both the convert and the tidy command.

use crate::cli::args::SessionArgs;
use crate::config::ConverterConfig;
use crate::error::ConverterError;
use crate::logging::{SessionLog, setup_logging};
use crate::models::ProcessingStats;
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Expand glob patterns among the inputs, keeping everything else verbatim
///
/// A pattern matching nothing is kept as a literal path so the converter
/// reports it as missing instead of silently skipping it.
pub fn expand_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for input in inputs {
        if !is_glob_pattern(input) {
            paths.push(PathBuf::from(input));
            continue;
        }

        match glob::glob(input) {
            Ok(entries) => {
                let mut matched: Vec<PathBuf> = entries
                    .filter_map(|entry| match entry {
                        Ok(path) => Some(path),
                        Err(e) => {
                            warn!("Skipping unreadable match for {}: {}", input, e);
                            None
                        }
                    })
                    .filter(|path| path.is_file())
                    .collect();
                matched.sort();

                if matched.is_empty() {
                    warn!("Pattern matched no files: {}", input);
                    paths.push(PathBuf::from(input));
                } else {
                    debug!("Pattern {} matched {} files", input, matched.len());
                    paths.extend(matched);
                }
            }
            Err(e) => {
                warn!("Invalid glob pattern {}: {}", input, e);
                paths.push(PathBuf::from(input));
            }
        }
    }

    paths
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Open the session log (if requested) and install the tracing subscriber
pub fn start_session(session: &SessionArgs) -> Result<Option<SessionLog>> {
    let session_log = session
        .log_file
        .as_deref()
        .map(SessionLog::open)
        .transpose()
        .context("Failed to open session log")?;

    setup_logging(session.get_log_level(), session_log.as_ref());
    Ok(session_log)
}

/// Resolve the settings file and load it over the defaults
///
/// An explicit `--config` must exist; the default location is only used
/// when present.
pub fn load_settings(config_file: Option<&Path>) -> Result<ConverterConfig> {
    info!("Loading configuration");

    let settings_path = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => ConverterConfig::default_settings_path().filter(|path| path.exists()),
    };

    match settings_path {
        Some(path) => {
            info!("Using settings file: {}", path.display());
            ConverterConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => {
            info!("No settings file found, using defaults");
            Ok(ConverterConfig::default())
        }
    }
}

/// Record a line in the session log, warning instead of failing
pub fn log_line(session_log: Option<&SessionLog>, text: &str) {
    if let Some(log) = session_log {
        if let Err(e) = log.line(text) {
            warn!("Could not write to session log {}: {}", log.path().display(), e);
        }
    }
}

/// Close the session log, flushing it to disk
pub fn finish_session(session_log: Option<SessionLog>, stats: &ProcessingStats) -> Result<()> {
    if let Some(log) = session_log {
        log_line(Some(&log), &summary_line(stats));
        log.close()
            .with_context(|| format!("Failed to close session log {}", log.path().display()))?;
    }
    Ok(())
}

/// Tell the operator a file failed
pub fn report_failure(input: &Path, error: &ConverterError, session_log: Option<&SessionLog>) {
    eprintln!(
        "{} {}: {}",
        "Error:".bright_red().bold(),
        input.display(),
        error.to_string().bright_red()
    );
    log_line(session_log, &format!("FAILED {}: {}", input.display(), error));
}

/// One-line summary for the session log
pub fn summary_line(stats: &ProcessingStats) -> String {
    format!(
        "{} files processed, {} failed, {} rows written in {}ms",
        stats.files_processed,
        stats.files_failed,
        stats.total_rows,
        stats.processing_time.as_millis()
    )
}

/// Print the final summary
pub fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_millis().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
}

/// Block until the operator presses Enter
pub fn wait_for_enter() {
    print!("{}", "Press Enter to exit".bright_white());
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_plain_inputs_kept_verbatim() {
        let inputs = vec!["a b.txt".to_string(), "missing.txt".to_string()];
        assert_eq!(
            expand_inputs(&inputs),
            vec![PathBuf::from("a b.txt"), PathBuf::from("missing.txt")]
        );
    }

    #[test]
    fn test_glob_expansion_sorted_files_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::write(temp_dir.path().join("c.csv"), "").unwrap();
        fs::create_dir(temp_dir.path().join("d.txt")).unwrap();

        let pattern = temp_dir.path().join("*.txt").to_string_lossy().into_owned();
        let expanded = expand_inputs(&[pattern]);
        assert_eq!(
            expanded,
            vec![temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_unmatched_glob_kept_literally() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.none").to_string_lossy().into_owned();
        assert_eq!(expand_inputs(&[pattern.clone()]), vec![PathBuf::from(pattern)]);
    }

    #[test]
    fn test_summary_line() {
        let stats = ProcessingStats {
            files_processed: 2,
            files_failed: 1,
            total_rows: 40,
            processing_time: Duration::from_millis(15),
        };
        assert_eq!(
            summary_line(&stats),
            "2 files processed, 1 failed, 40 rows written in 15ms"
        );
    }
}
