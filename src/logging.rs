//! File-based logging
//!
//! The terminal belongs to the player UI, so tracing output goes to a
//! daily rotating file instead of stdout.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "prayer-player";
const DEFAULT_FILTER: &str = "prayer_player=debug,warn";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/prayer-player.YYYY-MM-DD.log`. The level is
/// taken from `RUST_LOG` when set, otherwise `prayer_player` logs at DEBUG and
/// everything else at WARN.
///
/// The returned guard flushes pending records on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");

    Ok(guard)
}

/// Log the outcome of a content fetch
#[macro_export]
macro_rules! log_fetch_result {
    ($what:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(what = %$what, "Content fetched"),
            Err(e) => tracing::error!(what = %$what, error = %e, "Content fetch failed"),
        }
    };
}
