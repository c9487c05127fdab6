//! Framework maturity commands.

use super::{print_json, OutputFormat};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use siv_core::{
    overview, query, FrameworkFunction, FrameworkQuery, FrameworkStats, MaturityTier, RecordStore,
};

/// Message shown when a query matches nothing.
pub const NO_FUNCTIONS_MESSAGE: &str = "No framework functions found matching your criteria.";

#[derive(Serialize)]
struct FunctionListOutput<'a> {
    filtered: &'a [FrameworkFunction],
    stats: &'a FrameworkStats,
}

/// Lists framework functions matching the search term and selectors.
pub fn cmd_framework_list(
    store: &dyn RecordStore<FrameworkFunction>,
    search: Option<String>,
    function: Option<String>,
    maturity: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let params = FrameworkQuery::for_framework(
        search.unwrap_or_default(),
        function.as_deref(),
        maturity.as_deref(),
    );
    let result = query(store, &params);

    if format == OutputFormat::Json {
        return print_json(&FunctionListOutput {
            filtered: &result.filtered,
            stats: &result.stats,
        });
    }

    println!("{}", "Framework Functions".bold());
    println!("───────────────────");
    if result.is_empty() {
        println!("{}", NO_FUNCTIONS_MESSAGE);
        return Ok(());
    }
    for function in &result.filtered {
        println!("  {}", function_row(function));
        for category in &function.categories {
            println!(
                "      {} {} ({}/{} controls)",
                category.name,
                score_label(category.score),
                category.implemented,
                category.total
            );
        }
    }
    println!();
    for line in stats_lines(&result.stats) {
        println!("{}", line);
    }
    Ok(())
}

/// Prints maturity statistics over every framework function.
pub fn cmd_framework_summary(
    store: &dyn RecordStore<FrameworkFunction>,
    format: OutputFormat,
) -> Result<()> {
    let stats = overview(store);

    if format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("{}", "Framework Maturity".bold());
    println!("──────────────────");
    for line in stats_lines(&stats) {
        println!("{}", line);
    }
    println!();
    println!("{}", "By Maturity".bold());
    for tier in MaturityTier::ALL {
        println!("  {}: {}", tier, stats.maturity(tier));
    }
    Ok(())
}

/// One line describing a framework function.
pub fn function_row(function: &FrameworkFunction) -> String {
    format!(
        "{} {} [{}] {}/{} controls",
        function.name.cyan(),
        score_label(function.score),
        function.maturity(),
        function.implemented_controls(),
        function.total_controls()
    )
}

/// Headline counters for a stats block.
pub fn stats_lines(stats: &FrameworkStats) -> Vec<String> {
    let mut lines = vec![format!("  Functions: {}", stats.total)];
    if let Some(avg) = stats.average_score {
        lines.push(format!("  Overall Maturity: {:.0}%", avg));
    }
    lines.push(format!(
        "  Controls Implemented: {}/{}",
        stats.implemented_controls, stats.total_controls
    ));
    if let Some(coverage) = stats.control_coverage {
        lines.push(format!("  Control Coverage: {:.1}%", coverage));
    }
    if let Some(name) = &stats.weakest_function {
        lines.push(format!("  Weakest Function: {}", name));
    }
    lines
}

fn score_label(score: u8) -> ColoredString {
    let label = format!("{}%", score);
    match MaturityTier::from_score(score) {
        MaturityTier::Mature => label.green(),
        MaturityTier::Developing => label.yellow(),
        MaturityTier::Initial => label.red(),
    }
}
