//! tracing setup: non-blocking file output with rotation, plus a colored
//! stdout layer in text mode. JSON mode writes structured lines to the file
//! only, for log shippers.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    }
}

fn build_filter(config: &AppConfig) -> EnvFilter {
    // RUST_LOG wins; otherwise the configured level, with sqlx statement
    // logging capped and the crate silenced when tracing is off
    let directives = if config.enable_tracing {
        format!("{},sqlx=warn", config.log_level)
    } else {
        format!("{},sqlx=warn,custodia=off", config.log_level)
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Install the global subscriber. The returned guard must be held for the
/// process lifetime or buffered log lines are lost on exit.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config));

    let registry = tracing_subscriber::registry().with(build_filter(config));

    if config.use_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true) // keep target for structured queries
                    .with_writer(file_writer)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(file_writer)
                    .with_ansi(false),
            )
            .with(fmt::layer().with_target(false).with_ansi(true))
            .init();
    }

    guard
}
