//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`, like any `env_logger` setup.
pub fn init() {
    env_logger::init();
}

/// Initialize logging for the test harness
///
/// Output is captured per test and repeated calls are ignored.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
