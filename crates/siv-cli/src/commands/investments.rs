//! Budget allocation commands.

use super::{print_json, OutputFormat};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use siv_core::{
    overview, query, InvestmentQuery, InvestmentStats, RecordStore, SecurityCategory, ThreatLevel,
};

/// Message shown when a query matches nothing.
pub const NO_INVESTMENTS_MESSAGE: &str = "No investment categories found matching your criteria.";

#[derive(Serialize)]
struct AllocationOutput<'a> {
    budget: u64,
    budget_utilization: Option<f64>,
    #[serde(flatten)]
    stats: &'a InvestmentStats,
}

#[derive(Serialize)]
struct InvestmentListOutput<'a> {
    filtered: &'a [SecurityCategory],
    stats: AllocationOutput<'a>,
}

/// Lists investment categories matching the search term and risk selector.
pub fn cmd_investments_list(
    store: &dyn RecordStore<SecurityCategory>,
    search: Option<String>,
    risk: Option<String>,
    budget: u64,
    format: OutputFormat,
) -> Result<()> {
    let params = InvestmentQuery::for_investments(search.unwrap_or_default(), risk.as_deref());
    let result = query(store, &params);

    if format == OutputFormat::Json {
        return print_json(&InvestmentListOutput {
            filtered: &result.filtered,
            stats: allocation(&result.stats, budget),
        });
    }

    println!("{}", "Security Investments".bold());
    println!("────────────────────");
    if result.is_empty() {
        println!("{}", NO_INVESTMENTS_MESSAGE);
        return Ok(());
    }
    for category in &result.filtered {
        println!("  {}", category_row(category));
    }
    println!();
    for line in stats_lines(&result.stats, budget) {
        println!("{}", line);
    }
    Ok(())
}

/// Prints budget allocation over every investment category.
pub fn cmd_investments_summary(
    store: &dyn RecordStore<SecurityCategory>,
    budget: u64,
    format: OutputFormat,
) -> Result<()> {
    let stats = overview(store);

    if format == OutputFormat::Json {
        return print_json(&allocation(&stats, budget));
    }

    println!("{}", "Budget Allocation".bold());
    println!("─────────────────");
    for line in stats_lines(&stats, budget) {
        println!("{}", line);
    }
    Ok(())
}

fn allocation(stats: &InvestmentStats, budget: u64) -> AllocationOutput<'_> {
    AllocationOutput {
        budget,
        budget_utilization: stats.budget_utilization(budget),
        stats,
    }
}

/// One line describing an investment category.
pub fn category_row(category: &SecurityCategory) -> String {
    format!(
        "{} current ${} recommended ${} ({}) roi {}x risk {}",
        category.name.cyan(),
        category.current,
        category.recommended,
        signed(category.adjustment()),
        category.roi,
        risk_label(category.risk)
    )
}

/// Headline counters for a stats block.
pub fn stats_lines(stats: &InvestmentStats, budget: u64) -> Vec<String> {
    let mut lines = vec![
        format!("  Categories: {}", stats.total),
        format!("  Current Spend: ${}", stats.total_current),
        format!("  Recommended Spend: ${}", stats.total_recommended),
        format!("  Adjustment: {}", signed(stats.total_adjustment())),
        format!("  Budget: ${}", budget),
    ];
    match stats.budget_utilization(budget) {
        Some(utilization) => lines.push(format!("  Budget Utilization: {:.1}%", utilization)),
        None => lines.push("  Budget Utilization: n/a".to_string()),
    }
    if let Some(name) = &stats.best_roi {
        lines.push(format!("  Best Return: {}", name));
    }
    lines
}

fn signed(amount: i128) -> String {
    if amount < 0 {
        format!("-${}", amount.unsigned_abs())
    } else {
        format!("+${}", amount)
    }
}

fn risk_label(level: ThreatLevel) -> ColoredString {
    let label = level.to_string();
    match level {
        ThreatLevel::High => label.red(),
        ThreatLevel::Medium => label.yellow(),
        ThreatLevel::Low => label.green(),
    }
}
