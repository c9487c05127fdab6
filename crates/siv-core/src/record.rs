//! Field mapping shared by every record set.
//!
//! The store, filter, and aggregator only see records through this trait, so
//! each record set supplies its field selectors once instead of every view
//! re-implementing the comparison logic.

use crate::models::{Asset, FrameworkFunction, SecurityCategory, ThreatEntry};
use std::borrow::Cow;

/// A record that can be stored, searched, and faceted.
pub trait Record: Clone + Send + Sync {
    /// Categorical fields usable as exact-match filters.
    type Facet: Copy + Eq + std::fmt::Debug;

    /// Unique key within a store.
    fn record_id(&self) -> &str;

    /// Fields matched by the free-text search term.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the given facet, compared literally against filter values.
    fn facet_value(&self, facet: Self::Facet) -> Cow<'_, str>;

    /// Checks record-level invariants before the record enters a store.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Facets of an [`Asset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFacet {
    /// The asset type selector.
    Type,
    /// The criticality selector.
    Criticality,
}

impl Record for Asset {
    type Facet = AssetFacet;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str(), self.owner.as_str()]
    }

    fn facet_value(&self, facet: AssetFacet) -> Cow<'_, str> {
        match facet {
            AssetFacet::Type => Cow::Borrowed(self.asset_type.as_str()),
            AssetFacet::Criticality => Cow::Borrowed(self.criticality.as_str()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        Asset::validate(self)
    }
}

/// Facets of a [`ThreatEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatFacet {
    /// The threat selector, keyed by the lower-cased threat name.
    Threat,
}

impl Record for ThreatEntry {
    type Facet = ThreatFacet;

    fn record_id(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn facet_value(&self, facet: ThreatFacet) -> Cow<'_, str> {
        match facet {
            ThreatFacet::Threat => Cow::Owned(self.name.to_lowercase()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        ThreatEntry::validate(self)
    }
}

/// Facets of a [`FrameworkFunction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkFacet {
    /// The function selector, keyed by function id.
    Function,
    /// The maturity tier of the function score.
    Maturity,
}

impl Record for FrameworkFunction {
    type Facet = FrameworkFacet;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.id.as_str(), self.description.as_str()];
        fields.extend(self.categories.iter().map(|c| c.name.as_str()));
        fields
    }

    fn facet_value(&self, facet: FrameworkFacet) -> Cow<'_, str> {
        match facet {
            FrameworkFacet::Function => Cow::Borrowed(self.id.as_str()),
            FrameworkFacet::Maturity => Cow::Borrowed(self.maturity().as_str()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        FrameworkFunction::validate(self)
    }
}

/// Facets of a [`SecurityCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentFacet {
    /// Residual risk level.
    Risk,
}

impl Record for SecurityCategory {
    type Facet = InvestmentFacet;

    fn record_id(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn facet_value(&self, facet: InvestmentFacet) -> Cow<'_, str> {
        match facet {
            InvestmentFacet::Risk => Cow::Borrowed(self.risk.as_str()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        SecurityCategory::validate(self)
    }
}
