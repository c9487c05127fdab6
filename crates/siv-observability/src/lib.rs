//! # siv-observability
//!
//! Logging infrastructure for Sentinel Invest.
//!
//! This crate configures structured logging with tracing, as human-readable
//! text for terminals or JSON for log aggregation.

pub mod logging;

pub use logging::{init_logging_with_config, parse_level, LoggingConfig, LOGGED_TARGETS};
