//! Asset inventory commands.

use super::{print_json, OutputFormat};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use siv_core::{
    overview, query, Asset, AssetQuery, AssetStats, AssetType, Compliance, Criticality,
    RecordStore, RiskBand,
};

/// Message shown when a query matches nothing.
pub const NO_ASSETS_MESSAGE: &str = "No assets found matching your criteria.";

#[derive(Serialize)]
struct AssetListOutput<'a> {
    filtered: &'a [Asset],
    stats: &'a AssetStats,
}

/// Lists assets matching the given search term and selectors.
pub fn cmd_assets_list(
    store: &dyn RecordStore<Asset>,
    search: Option<String>,
    asset_type: Option<String>,
    criticality: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let params = AssetQuery::for_assets(
        search.unwrap_or_default(),
        asset_type.as_deref(),
        criticality.as_deref(),
    );
    let result = query(store, &params);

    if format == OutputFormat::Json {
        return print_json(&AssetListOutput {
            filtered: &result.filtered,
            stats: &result.stats,
        });
    }

    println!("{}", "Asset Registry".bold());
    println!("──────────────");
    if result.is_empty() {
        println!("{}", NO_ASSETS_MESSAGE);
        return Ok(());
    }
    for asset in &result.filtered {
        println!("  {}", asset_row(asset));
    }
    println!();
    for line in stats_lines(&result.stats) {
        println!("{}", line);
    }
    Ok(())
}

/// Prints overview statistics over every asset.
pub fn cmd_assets_summary(store: &dyn RecordStore<Asset>, format: OutputFormat) -> Result<()> {
    let stats = overview(store);

    if format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("{}", "Asset Overview".bold());
    println!("──────────────");
    for line in stats_lines(&stats) {
        println!("{}", line);
    }
    println!();
    println!("{}", "By Type".bold());
    for asset_type in AssetType::ALL {
        println!("  {}: {}", asset_type, stats.asset_type(asset_type));
    }
    Ok(())
}

/// One table row for an asset.
pub fn asset_row(asset: &Asset) -> String {
    format!(
        "{} {} [{}] [{}] {} risk {} vulns {} [{}] {}",
        asset.id.cyan(),
        asset.name,
        asset.asset_type.as_str(),
        criticality_label(asset.criticality),
        asset.owner,
        risk_label(asset.risk_score),
        asset.vulnerabilities,
        compliance_label(asset.compliance),
        asset.last_updated
    )
}

/// Headline counters for a stats block.
pub fn stats_lines(stats: &AssetStats) -> Vec<String> {
    let critical = stats.criticality(Criticality::Critical);
    let mut lines = vec![
        format!("  Total Assets: {}", stats.total),
        format!("  Critical Assets: {}", critical),
        format!("  High Risk: {}", stats.high_risk),
        format!("  Non-Compliant: {}", stats.non_compliant),
        format!("  Open Vulnerabilities: {}", stats.total_vulnerabilities),
    ];
    if let Some(avg) = stats.average_risk_score {
        lines.push(format!("  Average Risk Score: {:.1}", avg));
    }
    lines
}

fn criticality_label(criticality: Criticality) -> ColoredString {
    let label = criticality.as_str();
    match criticality {
        Criticality::Critical => label.red(),
        Criticality::High => label.yellow(),
        Criticality::Medium => label.cyan(),
        Criticality::Low => label.green(),
    }
}

fn compliance_label(compliance: Compliance) -> ColoredString {
    let label = compliance.as_str().replace('-', " ");
    match compliance {
        Compliance::Compliant => label.green(),
        Compliance::ReviewNeeded => label.yellow(),
        Compliance::NonCompliant => label.red(),
    }
}

fn risk_label(score: u8) -> ColoredString {
    let label = score.to_string();
    match RiskBand::from_score(score) {
        RiskBand::Severe => label.red(),
        RiskBand::Elevated => label.yellow(),
        RiskBand::Moderate => label.cyan(),
        RiskBand::Low => label.green(),
    }
}
