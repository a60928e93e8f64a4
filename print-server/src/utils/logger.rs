//! Logging Infrastructure
//!
//! Structured logging for the print server: human readable by default,
//! JSON lines when `LOG_JSON` is set, optionally into daily rotated files.

use std::path::Path;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logger with defaults (info, plain text, stdout)
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. File output is
/// used only when `log_dir` exists; otherwise logs go to stdout.
/// Calling this twice is harmless: the second call is ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, to_file) = match log_dir.map(Path::new) {
        Some(dir) if dir.is_dir() => (
            BoxMakeWriter::new(tracing_appender::rolling::daily(dir, "print-server")),
            true,
        ),
        _ => (BoxMakeWriter::new(std::io::stdout), false),
    };

    let layer = if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(!to_file)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();

    if let (Some(dir), false) = (log_dir, to_file) {
        tracing::warn!(log_dir = %dir, "Log directory not found, logging to stdout");
    }
}
