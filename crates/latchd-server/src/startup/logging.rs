//! Logging initialization
//!
//! Console logging is always on, filtered by `RUST_LOG` (default `info`).
//! If `logs.path` is configured, events are additionally written to a
//! daily-rolling `latchd.log` in that directory.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::model::config::Configuration;

/// Initializes the global tracing subscriber.
///
/// Returns the appender worker guard when file logging is enabled; the
/// caller must hold it for the life of the process or buffered events are
/// lost.
pub fn init_logging(configuration: &Configuration) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match configuration.log_dir() {
        Some(dir) => {
            let file_appender = rolling::daily(dir, "latchd.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .try_init()?;
            Ok(None)
        }
    }
}
