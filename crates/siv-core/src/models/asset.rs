//! Asset data model for the inventory view.
//!
//! Assets represent tracked infrastructure (servers, databases, network gear,
//! endpoints) together with their risk and compliance posture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Risk score at or above which an asset counts as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 80;

/// Represents a tracked IT/security asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Externally assigned identifier (e.g. `SRV-001`).
    pub id: String,
    /// Human-readable name for the asset.
    pub name: String,
    /// Type of asset.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Business criticality level.
    pub criticality: Criticality,
    /// Team or person owning the asset.
    pub owner: String,
    /// Physical or logical location.
    pub location: String,
    /// Risk score in `[0, 100]`.
    pub risk_score: u8,
    /// Date of the last inventory update.
    pub last_updated: NaiveDate,
    /// Number of open vulnerabilities.
    pub vulnerabilities: u32,
    /// Compliance posture.
    pub compliance: Compliance,
}

impl Asset {
    /// Creates a new asset with required fields.
    ///
    /// Location defaults to empty, the update date to today, and the asset
    /// starts compliant with no known vulnerabilities.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        asset_type: AssetType,
        criticality: Criticality,
        owner: impl Into<String>,
        risk_score: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_type,
            criticality,
            owner: owner.into(),
            location: String::new(),
            risk_score,
            last_updated: chrono::Utc::now().date_naive(),
            vulnerabilities: 0,
            compliance: Compliance::Compliant,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the open vulnerability count.
    pub fn with_vulnerabilities(mut self, vulnerabilities: u32) -> Self {
        self.vulnerabilities = vulnerabilities;
        self
    }

    /// Sets the compliance posture.
    pub fn with_compliance(mut self, compliance: Compliance) -> Self {
        self.compliance = compliance;
        self
    }

    /// Sets the last update date.
    pub fn with_last_updated(mut self, last_updated: NaiveDate) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Whether the risk score reaches [`HIGH_RISK_THRESHOLD`].
    pub fn is_high_risk(&self) -> bool {
        self.risk_score >= HIGH_RISK_THRESHOLD
    }

    /// Band of the asset's risk score.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }

    /// Checks field bounds that the type system cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("id must not be empty".to_string());
        }
        if self.risk_score > 100 {
            return Err(format!(
                "risk score must be within 0..=100, got {}",
                self.risk_score
            ));
        }
        Ok(())
    }
}

/// Classification of the asset type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Physical or virtual server.
    Server,
    /// Database server or managed database service.
    Database,
    /// Network equipment (router, switch, firewall).
    Network,
    /// End-user device.
    Endpoint,
}

impl AssetType {
    /// All asset types in display order.
    pub const ALL: [AssetType; 4] = [
        AssetType::Server,
        AssetType::Database,
        AssetType::Network,
        AssetType::Endpoint,
    ];

    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Server => "server",
            AssetType::Database => "database",
            AssetType::Network => "network",
            AssetType::Endpoint => "endpoint",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Server => write!(f, "Server"),
            AssetType::Database => write!(f, "Database"),
            AssetType::Network => write!(f, "Network Device"),
            AssetType::Endpoint => write!(f, "Endpoint"),
        }
    }
}

/// Business criticality level of an asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Low criticality - minimal business impact.
    Low,
    /// Medium criticality.
    Medium,
    /// High criticality - significant business impact.
    High,
    /// Critical - essential business service.
    Critical,
}

impl Criticality {
    /// All levels, lowest first.
    pub const ALL: [Criticality; 4] = [
        Criticality::Low,
        Criticality::Medium,
        Criticality::High,
        Criticality::Critical,
    ];

    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Low => "low",
            Criticality::Medium => "medium",
            Criticality::High => "high",
            Criticality::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criticality::Low => write!(f, "Low"),
            Criticality::Medium => write!(f, "Medium"),
            Criticality::High => write!(f, "High"),
            Criticality::Critical => write!(f, "Critical"),
        }
    }
}

/// Compliance posture of an asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Compliance {
    /// Meets all applicable controls.
    Compliant,
    /// Flagged for manual review.
    ReviewNeeded,
    /// Fails one or more controls.
    NonCompliant,
}

impl Compliance {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Compliance::Compliant => "compliant",
            Compliance::ReviewNeeded => "review-needed",
            Compliance::NonCompliant => "non-compliant",
        }
    }
}

impl std::fmt::Display for Compliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compliance::Compliant => write!(f, "Compliant"),
            Compliance::ReviewNeeded => write!(f, "Review Needed"),
            Compliance::NonCompliant => write!(f, "Non-Compliant"),
        }
    }
}

/// Coarse band of a 0-100 risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Below 40.
    Low,
    /// 40 to 59.
    Moderate,
    /// 60 to 79.
    Elevated,
    /// 80 and above.
    Severe,
}

impl RiskBand {
    /// Classifies a score.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= HIGH_RISK_THRESHOLD => RiskBand::Severe,
            s if s >= 60 => RiskBand::Elevated,
            s if s >= 40 => RiskBand::Moderate,
            _ => RiskBand::Low,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Moderate => write!(f, "Moderate"),
            RiskBand::Elevated => write!(f, "Elevated"),
            RiskBand::Severe => write!(f, "Severe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_creation() {
        let asset = Asset::new(
            "SRV-001",
            "Primary Web Server",
            AssetType::Server,
            Criticality::Critical,
            "IT Operations",
            85,
        );

        assert_eq!(asset.id, "SRV-001");
        assert_eq!(asset.asset_type, AssetType::Server);
        assert_eq!(asset.compliance, Compliance::Compliant);
        assert_eq!(asset.vulnerabilities, 0);
        assert!(asset.location.is_empty());
        assert!(asset.is_high_risk());
    }

    #[test]
    fn test_high_risk_boundary() {
        let mut asset = Asset::new("A-1", "a", AssetType::Endpoint, Criticality::Low, "x", 80);
        assert!(asset.is_high_risk());
        asset.risk_score = 79;
        assert!(!asset.is_high_risk());
    }

    #[test]
    fn test_criticality_ordering() {
        assert!(Criticality::Critical > Criticality::High);
        assert!(Criticality::High > Criticality::Medium);
        assert!(Criticality::Medium > Criticality::Low);
    }

    #[test]
    fn test_risk_band() {
        assert_eq!(RiskBand::from_score(100), RiskBand::Severe);
        assert_eq!(RiskBand::from_score(80), RiskBand::Severe);
        assert_eq!(RiskBand::from_score(79), RiskBand::Elevated);
        assert_eq!(RiskBand::from_score(60), RiskBand::Elevated);
        assert_eq!(RiskBand::from_score(59), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(40), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(39), RiskBand::Low);
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let asset = Asset::new("A-1", "a", AssetType::Server, Criticality::Low, "x", 101);
        let err = asset.validate().unwrap_err();
        assert!(err.contains("0..=100"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let asset = Asset::new("", "a", AssetType::Server, Criticality::Low, "x", 10);
        assert!(asset.validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AssetType::Network), "Network Device");
        assert_eq!(format!("{}", Compliance::ReviewNeeded), "Review Needed");
        assert_eq!(format!("{}", Criticality::Critical), "Critical");
    }

    #[test]
    fn test_asset_serialization() {
        let asset = Asset::new(
            "EP-045",
            "Executive Laptop",
            AssetType::Endpoint,
            Criticality::High,
            "Executive Team",
            67,
        )
        .with_compliance(Compliance::NonCompliant)
        .with_last_updated(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "endpoint");
        assert_eq!(json["riskScore"], 67);
        assert_eq!(json["compliance"], "non-compliant");
        assert_eq!(json["lastUpdated"], "2024-01-13");

        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
    }
}
