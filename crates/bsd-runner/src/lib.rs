//! Blind-Spot Detection Replay Driver
//!
//! Feeds recorded broadcast traces through one engine per ego vehicle and
//! writes per-cycle results as JSON lines.

use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod replay;
pub mod trace;

pub use replay::{AlertSummary, CycleRecord, Replayer};
pub use trace::{LostLink, TraceFrame};

/// Replay error types
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed trace frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] bsd_engine::ConfigError),

    #[error("Engine task failed: {0}")]
    Join(String),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Usage: {0}")]
    Usage(String),
}

/// Default number of cycles between tracker sweeps
pub const DEFAULT_CLEANUP_EVERY: u64 = 10;

/// Command-line options
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Trace file; stdin when absent
    pub trace: Option<PathBuf>,
    /// Engine configuration file
    pub config: Option<PathBuf>,
    pub cleanup_every: u64,
    /// JSON log output
    pub json_logs: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            trace: None,
            config: None,
            cleanup_every: DEFAULT_CLEANUP_EVERY,
            json_logs: false,
        }
    }
}

impl CliArgs {
    pub const USAGE: &'static str =
        "bsd-replay [--json] [--config PATH] [--cleanup-every N] [TRACE.jsonl]";

    /// Parse arguments, program name excluded
    pub fn parse<I>(args: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => parsed.json_logs = true,
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ReplayError::Usage("--config needs a path".into()))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--cleanup-every" => {
                    let n = args
                        .next()
                        .and_then(|v| v.parse::<u64>().ok())
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            ReplayError::Usage("--cleanup-every needs a positive integer".into())
                        })?;
                    parsed.cleanup_every = n;
                }
                flag if flag.starts_with("--") => {
                    return Err(ReplayError::Usage(format!("unknown flag {}", flag)));
                }
                path => {
                    if parsed.trace.is_some() {
                        return Err(ReplayError::Usage("only one trace file allowed".into()));
                    }
                    parsed.trace = Some(PathBuf::from(path));
                }
            }
        }

        Ok(parsed)
    }
}

/// Initialize logging on stderr; stdout carries results.
/// `RUST_LOG` overrides the INFO default.
pub fn init_logging(json: bool) -> Result<(), ReplayError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
