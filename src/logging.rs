use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cd_base::config::constants::{ENV_LOG, LOG_FILE, LOGS_DIR, STORE_DIR};

/// File logging under `.channel-dungeons/logs/`. Stdout belongs to the terminal UI (or the replay JSON).
///
/// Keep the returned guard alive for the whole run; dropping it flushes the writer.
pub fn init_logging() -> io::Result<WorkerGuard> {
    let log_dir = Path::new(STORE_DIR).join(LOGS_DIR);
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!("logging to {}", log_dir.join(LOG_FILE).display());
    Ok(guard)
}
