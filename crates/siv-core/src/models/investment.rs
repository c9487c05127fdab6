//! Budget allocation across security investment categories.

use super::threat::ThreatLevel;
use serde::{Deserialize, Serialize};

/// Default total budget, in whole currency units.
pub const DEFAULT_BUDGET: u64 = 1_000_000;

/// Current and recommended spend for one security category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityCategory {
    /// Category name (e.g. `Network Security`).
    pub name: String,
    /// Current annual spend.
    pub current: u64,
    /// Recommended annual spend.
    pub recommended: u64,
    /// Expected return multiple on the recommended spend.
    pub roi: f64,
    /// Residual risk of the category.
    pub risk: ThreatLevel,
}

impl SecurityCategory {
    /// Creates a category.
    pub fn new(
        name: impl Into<String>,
        current: u64,
        recommended: u64,
        roi: f64,
        risk: ThreatLevel,
    ) -> Self {
        Self {
            name: name.into(),
            current,
            recommended,
            roi,
            risk,
        }
    }

    /// Change from current to recommended spend. Negative when the
    /// recommendation is a cut.
    pub fn adjustment(&self) -> i128 {
        i128::from(self.recommended) - i128::from(self.current)
    }

    /// Checks the name and return multiple.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.roi.is_finite() || self.roi < 0.0 {
            return Err(format!("roi must be non-negative, got {}", self.roi));
        }
        Ok(())
    }
}

/// Share of `budget` consumed by `spend`, in percent.
///
/// Returns `None` for a zero budget.
pub fn budget_utilization(spend: u64, budget: u64) -> Option<f64> {
    (budget > 0).then(|| spend as f64 / budget as f64 * 100.0)
}
