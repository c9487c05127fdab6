//! Predicate filter combining a free-text search with categorical facets.
//!
//! A record passes when the search term is a case-insensitive substring of
//! any of its search fields (an empty term matches everything) and every
//! active facet filter matches its facet value exactly. Facet values are
//! compared literally and case-sensitively; unknown values match nothing.

use crate::record::{AssetFacet, FrameworkFacet, InvestmentFacet, Record, ThreatFacet};
use serde::{Deserialize, Serialize};

/// Selector value that disables a facet filter.
pub const ALL_SENTINEL: &str = "all";

/// Filter over a single categorical field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetFilter {
    /// Pass-through.
    #[default]
    Any,
    /// Exact, case-sensitive equality with the given value.
    Exactly(String),
}

impl FacetFilter {
    /// Builds a filter from a raw selector value.
    ///
    /// `None` and the [`ALL_SENTINEL`] yield [`FacetFilter::Any`]; anything
    /// else is kept verbatim, including values outside the facet's domain.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => FacetFilter::Any,
            Some(value) if value == ALL_SENTINEL => FacetFilter::Any,
            Some(value) => FacetFilter::Exactly(value.to_string()),
        }
    }

    /// Whether the filter accepts `value`.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FacetFilter::Any => true,
            FacetFilter::Exactly(expected) => expected == value,
        }
    }

    /// Whether the filter is a pass-through.
    pub fn is_any(&self) -> bool {
        matches!(self, FacetFilter::Any)
    }
}

/// Search term plus facet filters over records with facet type `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery<F> {
    /// Free-text term, matched case-insensitively.
    pub search_term: String,
    /// Active facet filters. All of them must match.
    pub facets: Vec<(F, FacetFilter)>,
}

impl<F> Default for RecordQuery<F> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            facets: Vec::new(),
        }
    }
}

impl<F: Copy + Eq + std::fmt::Debug> RecordQuery<F> {
    /// Creates a query that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Adds a facet filter parsed from a raw selector value.
    pub fn facet(mut self, facet: F, raw: Option<&str>) -> Self {
        let filter = FacetFilter::parse(raw);
        if !filter.is_any() {
            self.facets.push((facet, filter));
        }
        self
    }

    /// Whether no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty() && self.facets.iter().all(|(_, f)| f.is_any())
    }

    /// Evaluates every active predicate against `record`.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Facet = F>,
    {
        matches_search(&self.search_term, &record.search_fields())
            && self
                .facets
                .iter()
                .all(|(facet, filter)| filter.matches(&record.facet_value(*facet)))
    }
}

/// Query over assets: search by name, id, or owner; facet by type and criticality.
pub type AssetQuery = RecordQuery<AssetFacet>;

/// Query over threats: search by name; facet by the threat selector.
pub type ThreatQuery = RecordQuery<ThreatFacet>;

impl RecordQuery<AssetFacet> {
    /// Builds an asset query from raw selector values.
    pub fn for_assets(
        search_term: impl Into<String>,
        asset_type: Option<&str>,
        criticality: Option<&str>,
    ) -> Self {
        Self::new()
            .search(search_term)
            .facet(AssetFacet::Type, asset_type)
            .facet(AssetFacet::Criticality, criticality)
    }
}

impl RecordQuery<ThreatFacet> {
    /// Builds a threat query from raw selector values.
    pub fn for_threats(search_term: impl Into<String>, threat: Option<&str>) -> Self {
        Self::new()
            .search(search_term)
            .facet(ThreatFacet::Threat, threat)
    }
}

/// Query over framework functions: search by name, id, description, or
/// category name; facet by function id and maturity tier.
pub type FrameworkQuery = RecordQuery<FrameworkFacet>;

/// Query over security investment categories: search by name; facet by risk.
pub type InvestmentQuery = RecordQuery<InvestmentFacet>;

impl RecordQuery<FrameworkFacet> {
    /// Builds a framework query from raw selector values.
    pub fn for_framework(
        search_term: impl Into<String>,
        function: Option<&str>,
        maturity: Option<&str>,
    ) -> Self {
        Self::new()
            .search(search_term)
            .facet(FrameworkFacet::Function, function)
            .facet(FrameworkFacet::Maturity, maturity)
    }
}

impl RecordQuery<InvestmentFacet> {
    /// Builds an investment query from raw selector values.
    pub fn for_investments(search_term: impl Into<String>, risk: Option<&str>) -> Self {
        Self::new()
            .search(search_term)
            .facet(InvestmentFacet::Risk, risk)
    }
}

/// Case-insensitive substring match against any field.
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Returns the records that satisfy `query`, in input order.
pub fn filter<R: Record>(records: &[R], query: &RecordQuery<R::Facet>) -> Vec<R> {
    records
        .iter()
        .filter(|r| query.matches(*r))
        .cloned()
        .collect()
}
