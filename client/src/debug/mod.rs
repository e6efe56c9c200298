//! # Logging Infrastructure
//!
//! Structured logging through `tracing`, written to a daily-rotated file by
//! `tracing-appender` and optionally mirrored to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `client=debug,info`)
//! - `MINERX_LOG_DIR`: Log directory (default: `logs`)
//! - `MINERX_LOG_STDERR`: Mirror logs to stderr (1=on)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logging from the environment.
///
/// # Example
///
/// ```rust,no_run
/// let _guard = client::debug::init();
/// tracing::info!("ready");
/// ```
pub fn init() -> Option<WorkerGuard> {
    init_logger(&DebugConfig::from_env())
}
