//! Long-running dashboard operations.

use super::{print_json, OutputFormat};
use anyhow::{anyhow, Result};
use colored::Colorize;
use siv_core::{OperationKind, OperationState, OperationTracker};
use std::time::Duration;

/// Runs an operation to completion, reporting its progress.
pub async fn cmd_run(
    tracker: &OperationTracker,
    operation: &str,
    simulate_delays: bool,
    format: OutputFormat,
) -> Result<()> {
    let kind = OperationKind::parse(operation).ok_or_else(|| {
        anyhow!(
            "Unknown operation: {} (expected refresh, analysis, optimization, or report)",
            operation
        )
    })?;
    let delay = if simulate_delays {
        kind.simulated_delay()
    } else {
        Duration::ZERO
    };

    if format == OutputFormat::Text {
        println!("{} {}...", "Running".cyan(), kind);
    }

    let state = tracker.run(kind, delay).await?;

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "operation": kind.as_str(),
            "result": state,
        }));
    }

    if let OperationState::Settled {
        started_at,
        settled_at,
    } = state
    {
        let elapsed = settled_at - started_at;
        println!(
            "{} {} in {}ms",
            "Completed".green(),
            kind,
            elapsed.num_milliseconds()
        );
    }
    Ok(())
}
