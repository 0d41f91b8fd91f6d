//! Logging setup.

mod logging;

pub use logging::{build_filter, log_file_appender, setup_logging, WorkerGuard};
