//! Threat landscape entries used by the risk assessment view.

use serde::{Deserialize, Serialize};

/// A threat category scored by probability, impact, and mitigation coverage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreatEntry {
    /// Threat name (e.g. `Ransomware`).
    pub name: String,
    /// Likelihood in percent.
    pub probability: u8,
    /// Impact level in percent.
    pub impact: u8,
    /// Current mitigation coverage in percent.
    pub mitigation: u8,
}

impl ThreatEntry {
    /// Creates a new threat entry.
    pub fn new(name: impl Into<String>, probability: u8, impact: u8, mitigation: u8) -> Self {
        Self {
            name: name.into(),
            probability,
            impact,
            mitigation,
        }
    }

    /// Combined exposure, `probability * impact / 100`.
    pub fn exposure(&self) -> f64 {
        f64::from(self.probability) * f64::from(self.impact) / 100.0
    }

    /// Risk level derived from [`ThreatEntry::exposure`].
    pub fn risk_level(&self) -> ThreatLevel {
        ThreatLevel::from_exposure(self.exposure())
    }

    /// Tier of the mitigation coverage.
    pub fn mitigation_tier(&self) -> MitigationTier {
        MitigationTier::from_coverage(self.mitigation)
    }

    /// Checks that every percentage lies in `[0, 100]`.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        for (field, value) in [
            ("probability", self.probability),
            ("impact", self.impact),
            ("mitigation", self.mitigation),
        ] {
            if value > 100 {
                return Err(format!("{} must be within 0..=100, got {}", field, value));
            }
        }
        Ok(())
    }
}

/// Risk level of a threat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    /// Exposure of 40 or less.
    Low,
    /// Exposure above 40, up to 70.
    Medium,
    /// Exposure above 70.
    High,
}

impl ThreatLevel {
    /// All levels, lowest first.
    pub const ALL: [ThreatLevel; 3] = [ThreatLevel::Low, ThreatLevel::Medium, ThreatLevel::High];

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
        }
    }

    /// Classifies an exposure value. Both thresholds are exclusive.
    pub fn from_exposure(exposure: f64) -> Self {
        if exposure > 70.0 {
            ThreatLevel::High
        } else if exposure > 40.0 {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatLevel::Low => write!(f, "Low"),
            ThreatLevel::Medium => write!(f, "Medium"),
            ThreatLevel::High => write!(f, "High"),
        }
    }
}

/// How well a threat is covered by current controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MitigationTier {
    /// Below 70%.
    Weak,
    /// 70% to 84%.
    Adequate,
    /// 85% and above.
    Strong,
}

impl MitigationTier {
    /// Classifies a coverage percentage.
    pub fn from_coverage(coverage: u8) -> Self {
        match coverage {
            c if c >= 85 => MitigationTier::Strong,
            c if c >= 70 => MitigationTier::Adequate,
            _ => MitigationTier::Weak,
        }
    }
}

impl std::fmt::Display for MitigationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MitigationTier::Weak => write!(f, "Weak"),
            MitigationTier::Adequate => write!(f, "Adequate"),
            MitigationTier::Strong => write!(f, "Strong"),
        }
    }
}
