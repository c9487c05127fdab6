//! Command handlers for the Sentinel Invest CLI.

pub mod framework;
pub mod inventory;
pub mod investments;
pub mod operations;
pub mod threats;

pub use framework::{cmd_framework_list, cmd_framework_summary};
pub use inventory::{cmd_assets_list, cmd_assets_summary};
pub use investments::{cmd_investments_list, cmd_investments_summary};
pub use operations::cmd_run;
pub use threats::{cmd_threats_list, cmd_threats_summary};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured, human-readable text.
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
