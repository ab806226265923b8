//! Logging configuration for the D1 console.
//!
//! Interactive sessions log to a file so diagnostics never interleave with the
//! prompt. One-shot commands log to stderr.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initializes logging for interactive mode.
///
/// Location: `~/.local/state/d1-console/d1-console.log` on Linux (XDG state
/// directory), or the platform-appropriate state/config directory elsewhere.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    // Truncate on each run to avoid unbounded growth
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .try_init();
}

/// Initializes logging for one-shot commands and `--execute`.
///
/// Only warnings reach stderr unless `RUST_LOG` says otherwise, so scripted
/// output stays clean.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the path for the log file.
fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("d1-console").join("d1-console.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("d1-console").join("d1-console.log");
    }

    std::env::temp_dir().join("d1-console.log")
}
