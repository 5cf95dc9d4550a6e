//! Tracing subscriber setup
//!
//! Console output plus, when a log directory is configured, two daily-rotated
//! files: a combined log with everything and an error log with warnings and
//! errors only.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keeps the non-blocking file writers flushing.
///
/// Hold it for the lifetime of the process; dropping it stops file output.
#[derive(Default)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

impl LogGuard {
    /// Number of file writers kept alive
    pub fn file_writers(&self) -> usize {
        self._guards.len()
    }
}

/// Build the `EnvFilter`, preferring `RUST_LOG` over the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place and only return a guard for their own writers.
pub fn init_logging(config: &LoggingConfig) -> LogGuard {
    let mut layers = Vec::new();
    let mut guards = Vec::new();

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_timer(ChronoUtc::new(TIME_FORMAT.to_string()));
    layers.push(if config.json_format {
        console.json().flatten_event(true).boxed()
    } else {
        console.boxed()
    });

    if let Some(dir) = &config.log_dir {
        let dir = Path::new(dir);
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let (combined, guard) = tracing_appender::non_blocking(RollingFileAppender::new(
                    Rotation::DAILY,
                    dir,
                    &config.combined_file,
                ));
                guards.push(guard);
                let combined = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_timer(ChronoUtc::new(TIME_FORMAT.to_string()))
                    .with_writer(combined);
                layers.push(if config.json_format {
                    combined.json().flatten_event(true).boxed()
                } else {
                    combined.boxed()
                });

                let (errors, guard) = tracing_appender::non_blocking(RollingFileAppender::new(
                    Rotation::DAILY,
                    dir,
                    &config.error_file,
                ));
                guards.push(guard);
                let errors = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_timer(ChronoUtc::new(TIME_FORMAT.to_string()))
                    .with_writer(errors);
                layers.push(if config.json_format {
                    errors.json().flatten_event(true).with_filter(LevelFilter::WARN).boxed()
                } else {
                    errors.with_filter(LevelFilter::WARN).boxed()
                });
            }
            Err(e) => eprintln!("Failed to create log directory {:?}: {}", dir, e),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(layers)
        .try_init();

    LogGuard { _guards: guards }
}
