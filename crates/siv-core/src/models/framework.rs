//! Security framework maturity model.
//!
//! The framework view scores each core function (identify, protect, detect,
//! respond, recover) and breaks it down into categories of controls.

use serde::{Deserialize, Serialize};

/// A core framework function with its category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameworkFunction {
    /// Short identifier used by the function selector (e.g. `identify`).
    pub id: String,
    /// Display name (e.g. `Identify`).
    pub name: String,
    /// Implementation score in percent.
    pub score: u8,
    /// What the function covers.
    #[serde(default)]
    pub description: String,
    /// Control categories belonging to the function.
    #[serde(default)]
    pub categories: Vec<FrameworkCategory>,
}

impl FrameworkFunction {
    /// Creates a function with no categories.
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
            description: String::new(),
            categories: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a category.
    pub fn with_category(mut self, category: FrameworkCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Maturity tier of the function score.
    pub fn maturity(&self) -> MaturityTier {
        MaturityTier::from_score(self.score)
    }

    /// Implemented controls across all categories.
    pub fn implemented_controls(&self) -> u64 {
        self.categories
            .iter()
            .map(|c| u64::from(c.implemented))
            .sum()
    }

    /// Planned controls across all categories.
    pub fn total_controls(&self) -> u64 {
        self.categories.iter().map(|c| u64::from(c.total)).sum()
    }

    /// Checks the score and every category.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("id must not be empty".to_string());
        }
        if self.score > 100 {
            return Err(format!("score must be within 0..=100, got {}", self.score));
        }
        for category in &self.categories {
            category
                .validate()
                .map_err(|reason| format!("category '{}': {}", category.name, reason))?;
        }
        Ok(())
    }
}

/// A group of controls within a framework function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameworkCategory {
    /// Category name (e.g. `Asset Management`).
    pub name: String,
    /// Implementation score in percent.
    pub score: u8,
    /// Controls in place.
    pub implemented: u32,
    /// Controls planned.
    pub total: u32,
}

impl FrameworkCategory {
    /// Creates a category.
    pub fn new(name: impl Into<String>, score: u8, implemented: u32, total: u32) -> Self {
        Self {
            name: name.into(),
            score,
            implemented,
            total,
        }
    }

    /// Share of planned controls in place, in percent.
    ///
    /// Returns `None` for a category with no planned controls.
    pub fn coverage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(f64::from(self.implemented) / f64::from(self.total) * 100.0)
    }

    fn validate(&self) -> Result<(), String> {
        if self.score > 100 {
            return Err(format!("score must be within 0..=100, got {}", self.score));
        }
        if self.implemented > self.total {
            return Err(format!(
                "implemented controls ({}) exceed total ({})",
                self.implemented, self.total
            ));
        }
        Ok(())
    }
}

/// Maturity tier of a framework score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaturityTier {
    /// Below 60%.
    Initial,
    /// 60% to 79%.
    Developing,
    /// 80% and above.
    Mature,
}

impl MaturityTier {
    /// All tiers, lowest first.
    pub const ALL: [MaturityTier; 3] = [
        MaturityTier::Initial,
        MaturityTier::Developing,
        MaturityTier::Mature,
    ];

    /// Classifies a score.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => MaturityTier::Mature,
            s if s >= 60 => MaturityTier::Developing,
            _ => MaturityTier::Initial,
        }
    }

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityTier::Initial => "initial",
            MaturityTier::Developing => "developing",
            MaturityTier::Mature => "mature",
        }
    }
}

impl std::fmt::Display for MaturityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaturityTier::Initial => write!(f, "Initial"),
            MaturityTier::Developing => write!(f, "Developing"),
            MaturityTier::Mature => write!(f, "Mature"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect() -> FrameworkFunction {
        FrameworkFunction::new("detect", "Detect", 72)
            .with_category(FrameworkCategory::new("Anomalies & Events", 75, 9, 12))
            .with_category(FrameworkCategory::new("Security Monitoring", 68, 15, 22))
            .with_category(FrameworkCategory::new("Detection Processes", 73, 8, 11))
    }

    #[test]
    fn test_control_totals() {
        let function = detect();
        assert_eq!(function.implemented_controls(), 32);
        assert_eq!(function.total_controls(), 45);
        assert_eq!(function.maturity(), MaturityTier::Developing);
    }

    #[test]
    fn test_category_coverage() {
        let category = FrameworkCategory::new("Improvements", 60, 3, 5);
        assert_eq!(category.coverage(), Some(60.0));
        let empty = FrameworkCategory::new("Empty", 0, 0, 0);
        assert!(empty.coverage().is_none());
    }

    #[test]
    fn test_maturity_thresholds() {
        assert_eq!(MaturityTier::from_score(80), MaturityTier::Mature);
        assert_eq!(MaturityTier::from_score(79), MaturityTier::Developing);
        assert_eq!(MaturityTier::from_score(60), MaturityTier::Developing);
        assert_eq!(MaturityTier::from_score(59), MaturityTier::Initial);
    }

    #[test]
    fn test_validate() {
        assert!(detect().validate().is_ok());

        let err = detect()
            .with_category(FrameworkCategory::new("Broken", 50, 6, 5))
            .validate()
            .unwrap_err();
        assert!(err.contains("Broken"));

        assert!(FrameworkFunction::new("x", "X", 101).validate().is_err());
        assert!(FrameworkFunction::new("", "X", 10).validate().is_err());
    }
}
