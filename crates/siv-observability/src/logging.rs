//! Logging infrastructure for Sentinel Invest.
//!
//! Events go to stderr through a `tracing_subscriber` registry so command
//! output on stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Targets enabled by the default filter. `siv` is the binary crate, whose
/// events are emitted under the binary's name rather than the package name.
pub const LOGGED_TARGETS: [&str; 3] = ["siv", "siv_core", "siv_observability"];

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level.
    pub level: Level,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Whether to log span open/close events.
    pub include_spans: bool,
    /// Whether to include file/line info.
    pub include_location: bool,
    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            include_spans: false,
            include_location: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Verbose output for `--verbose` runs: debug level with spans and
    /// source locations.
    pub fn verbose() -> Self {
        Self {
            level: Level::DEBUG,
            include_spans: true,
            include_location: true,
            ..Self::default()
        }
    }

    /// Quiet output at the given level.
    pub fn at_level(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Switches between JSON and text output.
    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// Directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        LOGGED_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initializes the global subscriber with the given configuration.
pub fn init_logging_with_config(config: LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let json_layer = config.json_format.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(config.span_events())
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target)
    });
    let text_layer = (!config.json_format).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(config.span_events())
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Parses a level name such as `info` or `DEBUG`.
pub fn parse_level(level: &str) -> Option<Level> {
    level.parse().ok()
}
