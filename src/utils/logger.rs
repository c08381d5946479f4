use std::env;
use std::sync::Once;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Installs a global `tracing` subscriber
///
/// The level is read from `LOGLEVEL` (`TRACE`, `DEBUG`, `INFO`, `WARN`,
/// `ERROR`) and defaults to `INFO`. Calling it more than once is harmless;
/// if another subscriber is already installed it is left in place.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = level_from_env();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            debug!("Log level set to: {}", level);
        }
    });
}

fn level_from_env() -> Level {
    let log_level = env::var("LOGLEVEL")
        .unwrap_or_else(|_| "INFO".to_string())
        .to_uppercase();

    match log_level.as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
