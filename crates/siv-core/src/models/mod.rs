//! Data models for the dashboard record sets.
//!
//! Assets, threat entries, framework functions, and security investment
//! categories are independent flat record sets; none references another.

pub mod asset;
pub mod framework;
pub mod investment;
pub mod threat;

pub use asset::{Asset, AssetType, Compliance, Criticality, RiskBand, HIGH_RISK_THRESHOLD};
pub use framework::{FrameworkCategory, FrameworkFunction, MaturityTier};
pub use investment::{budget_utilization, SecurityCategory, DEFAULT_BUDGET};
pub use threat::{MitigationTier, ThreatEntry, ThreatLevel};
