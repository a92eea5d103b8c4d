//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_FILTER`] so lifecycle and
/// peripheral warnings are visible without any environment setup.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .init();
}

/// Initialize logging for tests, ignoring repeated initialization
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
