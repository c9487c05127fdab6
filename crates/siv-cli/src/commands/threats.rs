//! Threat landscape commands.

use super::{print_json, OutputFormat};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use siv_core::{
    overview, query, MitigationTier, RecordStore, ThreatEntry, ThreatLevel, ThreatQuery,
    ThreatStats,
};

/// Message shown when a query matches nothing.
pub const NO_THREATS_MESSAGE: &str = "No threats found matching your criteria.";

#[derive(Serialize)]
struct ThreatRow<'a> {
    #[serde(flatten)]
    threat: &'a ThreatEntry,
    exposure: f64,
    risk_level: ThreatLevel,
    mitigation_tier: MitigationTier,
}

impl<'a> From<&'a ThreatEntry> for ThreatRow<'a> {
    fn from(threat: &'a ThreatEntry) -> Self {
        Self {
            threat,
            exposure: threat.exposure(),
            risk_level: threat.risk_level(),
            mitigation_tier: threat.mitigation_tier(),
        }
    }
}

#[derive(Serialize)]
struct ThreatListOutput<'a> {
    filtered: Vec<ThreatRow<'a>>,
    stats: &'a ThreatStats,
}

/// Lists threats matching the search term and threat selector.
pub fn cmd_threats_list(
    store: &dyn RecordStore<ThreatEntry>,
    search: Option<String>,
    threat: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let params = ThreatQuery::for_threats(search.unwrap_or_default(), threat.as_deref());
    let result = query(store, &params);

    if format == OutputFormat::Json {
        return print_json(&ThreatListOutput {
            filtered: result.filtered.iter().map(ThreatRow::from).collect(),
            stats: &result.stats,
        });
    }

    println!("{}", "Threat Landscape".bold());
    println!("────────────────");
    if result.is_empty() {
        println!("{}", NO_THREATS_MESSAGE);
        return Ok(());
    }
    for threat in &result.filtered {
        println!("  {}", threat_row(threat));
    }
    println!();
    for line in stats_lines(&result.stats) {
        println!("{}", line);
    }
    Ok(())
}

/// Prints overview statistics over every threat.
pub fn cmd_threats_summary(
    store: &dyn RecordStore<ThreatEntry>,
    format: OutputFormat,
) -> Result<()> {
    let stats = overview(store);

    if format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("{}", "Threat Overview".bold());
    println!("───────────────");
    for line in stats_lines(&stats) {
        println!("{}", line);
    }
    Ok(())
}

/// One line describing a threat.
pub fn threat_row(threat: &ThreatEntry) -> String {
    format!(
        "{} probability {}% impact {}% mitigation {} risk level {}",
        threat.name.cyan(),
        threat.probability,
        threat.impact,
        mitigation_label(threat),
        level_label(threat.risk_level())
    )
}

/// Headline counters for a stats block.
pub fn stats_lines(stats: &ThreatStats) -> Vec<String> {
    let mut lines = vec![
        format!("  Total Threats: {}", stats.total),
        format!("  High Risk: {}", stats.risk_level(ThreatLevel::High)),
        format!("  Medium Risk: {}", stats.risk_level(ThreatLevel::Medium)),
        format!("  Low Risk: {}", stats.risk_level(ThreatLevel::Low)),
        format!("  Weakly Mitigated: {}", stats.weakly_mitigated),
    ];
    if let Some(avg) = stats.average_mitigation {
        lines.push(format!("  Average Mitigation: {:.1}%", avg));
    }
    if let Some(name) = &stats.highest_exposure {
        lines.push(format!("  Highest Exposure: {}", name));
    }
    lines
}

fn mitigation_label(threat: &ThreatEntry) -> ColoredString {
    let label = format!("{}%", threat.mitigation);
    match threat.mitigation_tier() {
        MitigationTier::Strong => label.green(),
        MitigationTier::Adequate => label.yellow(),
        MitigationTier::Weak => label.red(),
    }
}

fn level_label(level: ThreatLevel) -> ColoredString {
    let label = level.to_string();
    match level {
        ThreatLevel::High => label.red(),
        ThreatLevel::Medium => label.yellow(),
        ThreatLevel::Low => label.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_row() {
        let row = threat_row(&ThreatEntry::new("Insider Threat", 35, 95, 65));
        assert!(row.contains("Insider Threat"));
        assert!(row.contains("65%"));
        assert!(row.contains("Low"));
    }

    #[test]
    fn test_stats_lines() {
        let stats = siv_core::summarize(&[ThreatEntry::new("Malware", 85, 75, 90)]);
        let lines = stats_lines(&stats);
        assert_eq!(lines[0], "  Total Threats: 1");
        assert_eq!(lines[2], "  Medium Risk: 1");
        assert_eq!(lines.last().unwrap(), "  Highest Exposure: Malware");
    }

    #[test]
    fn test_json_row_is_flattened() {
        let threat = ThreatEntry::new("Phishing", 92, 60, 85);
        let value = serde_json::to_value(ThreatRow::from(&threat)).unwrap();
        assert_eq!(value["name"], "Phishing");
        assert_eq!(value["risk_level"], "medium");
        assert_eq!(value["mitigation_tier"], "strong");
    }
}
