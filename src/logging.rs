//! Structured logging setup and the session log file sink.
//!
//! Events go to stderr through `tracing-subscriber`. When a session log is
//! open the same events are mirrored into it, framed by start and end
//! marker lines.

use crate::constants::{LOG_TARGET, SESSION_TIMESTAMP_FORMAT};
use crate::error::{ConverterError, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use tracing_subscriber::fmt::MakeWriter;

/// Set up the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `log_level`. A subscriber installed
/// earlier in the process stays in place.
pub fn setup_logging(log_level: &str, session_log: Option<&SessionLog>) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let session_layer = session_log.map(|log| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(log.writer())
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(session_layer)
        .try_init();

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

struct SessionSink {
    writer: BufWriter<File>,
    open: bool,
}

/// Append-only log file for one CLI session
///
/// Closing (explicitly or on drop) writes the end marker and flushes.
pub struct SessionLog {
    path: PathBuf,
    sink: Arc<Mutex<SessionSink>>,
}

impl SessionLog {
    /// Open `path` for appending and write the start marker
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConverterError::io(path, e))?;

        let log = Self {
            path: path.to_path_buf(),
            sink: Arc::new(Mutex::new(SessionSink {
                writer: BufWriter::new(file),
                open: true,
            })),
        };
        log.line(&format!("=== session started {} ===", timestamp()))?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle the tracing subscriber writes through
    pub fn writer(&self) -> SessionLogWriter {
        SessionLogWriter {
            sink: Arc::clone(&self.sink),
        }
    }

    /// Append one line of text
    pub fn line(&self, text: &str) -> Result<()> {
        let mut sink = lock(&self.sink).map_err(|e| ConverterError::io(&self.path, e))?;
        if !sink.open {
            return Ok(());
        }
        writeln!(sink.writer, "{text}").map_err(|e| ConverterError::io(&self.path, e))
    }

    /// Write the end marker and flush, later calls are no-ops
    pub fn close(&self) -> Result<()> {
        let mut sink = lock(&self.sink).map_err(|e| ConverterError::io(&self.path, e))?;
        if !sink.open {
            return Ok(());
        }
        sink.open = false;
        writeln!(sink.writer, "=== session ended {} ===", timestamp())
            .and_then(|_| sink.writer.flush())
            .map_err(|e| ConverterError::io(&self.path, e))
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Writer handed to `tracing-subscriber`; output after close is discarded
#[derive(Clone)]
pub struct SessionLogWriter {
    sink: Arc<Mutex<SessionSink>>,
}

impl Write for SessionLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = lock(&self.sink)?;
        if !sink.open {
            return Ok(buf.len());
        }
        sink.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.sink)?.writer.flush()
    }
}

impl<'a> MakeWriter<'a> for SessionLogWriter {
    type Writer = SessionLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn lock(sink: &Mutex<SessionSink>) -> io::Result<MutexGuard<'_, SessionSink>> {
    sink.lock()
        .map_err(|_| io::Error::other("session log lock poisoned"))
}

fn timestamp() -> String {
    Local::now().format(SESSION_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_session_markers_and_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.log");

        let log = SessionLog::open(&path).unwrap();
        log.line("converted survey.txt").unwrap();
        log.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("=== session started "));
        assert_eq!(lines[1], "converted survey.txt");
        assert!(lines[2].starts_with("=== session ended "));
    }

    #[test]
    fn test_drop_closes_and_flushes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.log");

        {
            let log = SessionLog::open(&path).unwrap();
            let mut writer = log.writer();
            writeln!(writer, "from tracing").unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("from tracing\n"));
        assert!(contents.trim_end().ends_with("==="));
        assert!(contents.contains("=== session ended "));
    }

    #[test]
    fn test_sessions_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.log");

        SessionLog::open(&path).unwrap().close().unwrap();
        SessionLog::open(&path).unwrap().close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("session started").count(), 2);
        assert_eq!(contents.matches("session ended").count(), 2);
    }

    #[test]
    fn test_writes_after_close_are_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.log");

        let log = SessionLog::open(&path).unwrap();
        let mut writer = log.writer();
        log.close().unwrap();
        writer.write_all(b"late\n").unwrap();
        log.line("later").unwrap();
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("late"));
    }
}
