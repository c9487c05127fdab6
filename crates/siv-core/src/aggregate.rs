//! Summary statistics over record sequences.
//!
//! Every reduction is pure and recomputed in full on each call. Callers pick
//! the base set explicitly: the overview cards summarize the whole snapshot,
//! the inventory table summarizes its filtered rows.

use crate::models::{
    budget_utilization, Asset, AssetType, Compliance, Criticality, FrameworkFunction,
    MaturityTier, MitigationTier, RiskBand, SecurityCategory, ThreatEntry, ThreatLevel,
};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A record set that knows how to summarize itself.
pub trait Summarize: Record {
    /// Summary produced for a sequence of records.
    type Stats: Default + std::fmt::Debug + Clone + Serialize;

    /// Reduces `records` to their summary.
    fn summarize(records: &[Self]) -> Self::Stats;
}

/// Aggregate asset metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetStats {
    /// Number of assets.
    pub total: u64,

    /// Assets grouped by criticality. Every level is present.
    pub by_criticality: BTreeMap<Criticality, u64>,

    /// Assets grouped by type. Every type is present.
    pub by_type: BTreeMap<AssetType, u64>,

    /// Assets grouped by risk band. Every band is present.
    pub by_risk_band: BTreeMap<RiskBand, u64>,

    /// Assets whose risk score reaches the high-risk threshold.
    pub high_risk: u64,

    /// Assets flagged `non-compliant`.
    pub non_compliant: u64,

    /// Assets flagged `review-needed`.
    pub review_needed: u64,

    /// Sum of open vulnerabilities.
    pub total_vulnerabilities: u64,

    /// Mean risk score, if there are any assets.
    #[serde(default)]
    pub average_risk_score: Option<f64>,
}

impl AssetStats {
    /// Count for one criticality level.
    pub fn criticality(&self, level: Criticality) -> u64 {
        self.by_criticality.get(&level).copied().unwrap_or(0)
    }

    /// Count for one asset type.
    pub fn asset_type(&self, asset_type: AssetType) -> u64 {
        self.by_type.get(&asset_type).copied().unwrap_or(0)
    }
}

impl Summarize for Asset {
    type Stats = AssetStats;

    fn summarize(records: &[Asset]) -> AssetStats {
        let mut stats = AssetStats {
            by_criticality: Criticality::ALL.iter().map(|c| (*c, 0)).collect(),
            by_type: AssetType::ALL.iter().map(|t| (*t, 0)).collect(),
            by_risk_band: [
                RiskBand::Low,
                RiskBand::Moderate,
                RiskBand::Elevated,
                RiskBand::Severe,
            ]
            .iter()
            .map(|b| (*b, 0))
            .collect(),
            ..Default::default()
        };
        let mut risk_sum: u64 = 0;

        for asset in records {
            stats.total += 1;
            *stats.by_criticality.entry(asset.criticality).or_insert(0) += 1;
            *stats.by_type.entry(asset.asset_type).or_insert(0) += 1;
            *stats.by_risk_band.entry(asset.risk_band()).or_insert(0) += 1;
            if asset.is_high_risk() {
                stats.high_risk += 1;
            }
            match asset.compliance {
                Compliance::NonCompliant => stats.non_compliant += 1,
                Compliance::ReviewNeeded => stats.review_needed += 1,
                Compliance::Compliant => {}
            }
            stats.total_vulnerabilities += u64::from(asset.vulnerabilities);
            risk_sum += u64::from(asset.risk_score);
        }

        if stats.total > 0 {
            stats.average_risk_score = Some(risk_sum as f64 / stats.total as f64);
        }
        stats
    }
}

/// Aggregate threat landscape metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatStats {
    /// Number of threats.
    pub total: u64,

    /// Threats grouped by risk level. Every level is present.
    pub by_risk_level: BTreeMap<ThreatLevel, u64>,

    /// Threats whose mitigation tier is weak.
    pub weakly_mitigated: u64,

    /// Mean mitigation coverage, if there are any threats.
    #[serde(default)]
    pub average_mitigation: Option<f64>,

    /// Name of the threat with the greatest exposure (first one on ties).
    #[serde(default)]
    pub highest_exposure: Option<String>,
}

impl ThreatStats {
    /// Count for one risk level.
    pub fn risk_level(&self, level: ThreatLevel) -> u64 {
        self.by_risk_level.get(&level).copied().unwrap_or(0)
    }
}

impl Summarize for ThreatEntry {
    type Stats = ThreatStats;

    fn summarize(records: &[ThreatEntry]) -> ThreatStats {
        let mut stats = ThreatStats {
            by_risk_level: ThreatLevel::ALL.iter().map(|l| (*l, 0)).collect(),
            ..Default::default()
        };
        let mut mitigation_sum: u64 = 0;
        let mut top: Option<(&ThreatEntry, f64)> = None;

        for threat in records {
            stats.total += 1;
            *stats.by_risk_level.entry(threat.risk_level()).or_insert(0) += 1;
            if threat.mitigation_tier() == MitigationTier::Weak {
                stats.weakly_mitigated += 1;
            }
            mitigation_sum += u64::from(threat.mitigation);

            let exposure = threat.exposure();
            if top.map_or(true, |(_, best)| exposure > best) {
                top = Some((threat, exposure));
            }
        }

        if stats.total > 0 {
            stats.average_mitigation = Some(mitigation_sum as f64 / stats.total as f64);
        }
        stats.highest_exposure = top.map(|(t, _)| t.name.clone());
        stats
    }
}

/// Aggregate framework maturity metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkStats {
    /// Number of framework functions.
    pub total: u64,

    /// Mean function score, if there are any functions.
    #[serde(default)]
    pub average_score: Option<f64>,

    /// Functions grouped by maturity tier. Every tier is present.
    pub by_maturity: BTreeMap<MaturityTier, u64>,

    /// Implemented controls across every category.
    pub implemented_controls: u64,

    /// Planned controls across every category.
    pub total_controls: u64,

    /// Implemented share of planned controls in percent, if any are planned.
    #[serde(default)]
    pub control_coverage: Option<f64>,

    /// Name of the lowest-scoring function (first one on ties).
    #[serde(default)]
    pub weakest_function: Option<String>,
}

impl FrameworkStats {
    /// Count for one maturity tier.
    pub fn maturity(&self, tier: MaturityTier) -> u64 {
        self.by_maturity.get(&tier).copied().unwrap_or(0)
    }
}

impl Summarize for FrameworkFunction {
    type Stats = FrameworkStats;

    fn summarize(records: &[FrameworkFunction]) -> FrameworkStats {
        let mut stats = FrameworkStats {
            by_maturity: MaturityTier::ALL.iter().map(|t| (*t, 0)).collect(),
            ..Default::default()
        };
        let mut score_sum: u64 = 0;
        let mut weakest: Option<&FrameworkFunction> = None;

        for function in records {
            stats.total += 1;
            *stats.by_maturity.entry(function.maturity()).or_insert(0) += 1;
            stats.implemented_controls += function.implemented_controls();
            stats.total_controls += function.total_controls();
            score_sum += u64::from(function.score);

            if weakest.map_or(true, |w| function.score < w.score) {
                weakest = Some(function);
            }
        }

        if stats.total > 0 {
            stats.average_score = Some(score_sum as f64 / stats.total as f64);
        }
        if stats.total_controls > 0 {
            let share = stats.implemented_controls as f64 / stats.total_controls as f64;
            stats.control_coverage = Some(share * 100.0);
        }
        stats.weakest_function = weakest.map(|f| f.name.clone());
        stats
    }
}

/// Aggregate budget allocation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentStats {
    /// Number of investment categories.
    pub total: u64,

    /// Sum of current spend.
    pub total_current: u64,

    /// Sum of recommended spend.
    pub total_recommended: u64,

    /// Categories grouped by residual risk. Every level is present.
    pub by_risk: BTreeMap<ThreatLevel, u64>,

    /// Mean return multiple, if there are any categories.
    #[serde(default)]
    pub average_roi: Option<f64>,

    /// Name of the category with the highest return multiple (first one on ties).
    #[serde(default)]
    pub best_roi: Option<String>,
}

impl InvestmentStats {
    /// Count for one risk level.
    pub fn risk(&self, level: ThreatLevel) -> u64 {
        self.by_risk.get(&level).copied().unwrap_or(0)
    }

    /// Recommended spend as a share of `budget`, in percent.
    pub fn budget_utilization(&self, budget: u64) -> Option<f64> {
        budget_utilization(self.total_recommended, budget)
    }

    /// Change from current to recommended spend across every category.
    pub fn total_adjustment(&self) -> i128 {
        i128::from(self.total_recommended) - i128::from(self.total_current)
    }
}

impl Summarize for SecurityCategory {
    type Stats = InvestmentStats;

    fn summarize(records: &[SecurityCategory]) -> InvestmentStats {
        let mut stats = InvestmentStats {
            by_risk: ThreatLevel::ALL.iter().map(|l| (*l, 0)).collect(),
            ..Default::default()
        };
        let mut roi_sum = 0.0;
        let mut best: Option<&SecurityCategory> = None;

        for category in records {
            stats.total += 1;
            stats.total_current = stats.total_current.saturating_add(category.current);
            stats.total_recommended = stats.total_recommended.saturating_add(category.recommended);
            *stats.by_risk.entry(category.risk).or_insert(0) += 1;
            roi_sum += category.roi;

            if best.map_or(true, |b| category.roi > b.roi) {
                best = Some(category);
            }
        }

        if stats.total > 0 {
            stats.average_roi = Some(roi_sum / stats.total as f64);
        }
        stats.best_roi = best.map(|c| c.name.clone());
        stats
    }
}

/// Summarizes `records`.
pub fn summarize<R: Summarize>(records: &[R]) -> R::Stats {
    R::summarize(records)
}
