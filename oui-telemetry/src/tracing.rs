//! Global tracing subscriber setup.
//!
//! [`Environment::Dev`] logs pretty-printed events to the terminal. [`Environment::Prod`]
//! writes JSON lines to a daily rolling file under `logs/` through a non-blocking writer;
//! the returned [`LogFlusher`] must be kept alive until shutdown so buffered lines are
//! flushed. Both honour `RUST_LOG` and fall back to `info`.

use std::sync::Once;

use oui_config::Environment;
use thiserror::Error;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Directory receiving log files in [`Environment::Prod`].
const LOGS_DIR: &str = "logs";

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

static INIT_TEST_TRACING: Once = Once::new();

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to forward `log` records to tracing: {0}")]
    LogTracer(#[from] tracing_log::log::SetLoggerError),

    #[error("failed to install the global tracing subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Keeps the non-blocking log writer alive. Remaining lines are flushed on drop.
#[must_use = "dropping the flusher stops file logging"]
#[derive(Debug)]
pub struct LogFlusher {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber for `app_name` in `environment`.
pub fn init_tracing(app_name: &str, environment: Environment) -> Result<LogFlusher, TracingError> {
    LogTracer::init()?;

    match environment {
        Environment::Dev => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().pretty());
            set_global_default(subscriber)?;

            Ok(LogFlusher { _guard: None })
        }
        Environment::Prod => {
            let appender = tracing_appender::rolling::daily(LOGS_DIR, format!("{app_name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let subscriber = tracing_subscriber::registry().with(env_filter()).with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(writer),
            );
            set_global_default(subscriber)?;

            Ok(LogFlusher {
                _guard: Some(guard),
            })
        }
    }
}

/// Installs a test-friendly subscriber once per process.
///
/// Output goes through the test harness writer, so it only shows for failing tests.
pub fn init_test_tracing() {
    INIT_TEST_TRACING.call_once(|| {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer().with_test_writer());

        // Another subscriber may already be installed by the test binary.
        let _ = set_global_default(subscriber);
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
