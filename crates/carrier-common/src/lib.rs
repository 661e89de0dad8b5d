//! Carrier Common
//!
//! Shared infrastructure for services built on the carrier crates.

pub mod logging;

pub use logging::{init_logging, init_logging_with, LogFormat, LogSettings, LoggingError};
