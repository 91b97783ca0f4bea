//! Diagnostic logging setup.
//!
//! The chat view runs on the alternate screen, so tracing output must never
//! hit stdout or stderr while it is active. Interactive sessions therefore
//! log to a file (when `--debug-log` is given) or nowhere at all, while
//! one-shot commands log to stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Where diagnostic output goes for this process.
#[derive(Debug, Clone, Copy)]
pub enum LogDestination<'a> {
    /// Print to stderr. Used by one-shot commands that never enter the
    /// alternate screen.
    Stderr,
    /// Append structured lines to a file without ANSI colors.
    File(&'a Path),
    /// Swallow all output.
    Discard,
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; otherwise defaults to `info`, or to
/// `crmchat=debug` when logging to a file, since a debug file is only ever
/// requested to troubleshoot.
pub fn init_tracing(destination: LogDestination<'_>) -> io::Result<()> {
    // Append so one log file can collect several troubleshooting sessions.
    let file = match destination {
        LogDestination::File(path) => {
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        }
        _ => None,
    };
    INIT.call_once(move || {
        let default_filter = match destination {
            LogDestination::File(_) => "crmchat=debug",
            _ => "info",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        match destination {
            LogDestination::Stderr => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::stderr)
                    .init();
            }
            LogDestination::File(_) => {
                if let Some(file) = file {
                    tracing_subscriber::fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .init();
                }
            }
            LogDestination::Discard => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::sink)
                    .init();
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        assert!(init_tracing(LogDestination::Discard).is_ok());
        assert!(init_tracing(LogDestination::Discard).is_ok());
    }

    #[test]
    fn test_init_tracing_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        init_tracing(LogDestination::File(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_tracing_keeps_earlier_log_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        std::fs::write(&path, "earlier session\n").unwrap();
        init_tracing(LogDestination::File(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier session"));
    }
}
