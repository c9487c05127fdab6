//! # siv-core
//!
//! Query engine and data models for Sentinel Invest.
//!
//! This crate holds the asset inventory, threat landscape, framework maturity
//! and budget allocation models along with the record store they live in.
//! Every dashboard view shares the predicate filter and aggregator, combined
//! by the query facade. Long-running dashboard operations report progress
//! through [`OperationTracker`].

pub mod aggregate;
pub mod filter;
pub mod models;
pub mod operation;
pub mod query;
pub mod record;
pub mod store;

pub use aggregate::{summarize, AssetStats, FrameworkStats, InvestmentStats, Summarize, ThreatStats};
pub use filter::{
    filter, AssetQuery, FacetFilter, FrameworkQuery, InvestmentQuery, RecordQuery, ThreatQuery,
    ALL_SENTINEL,
};
pub use models::{
    budget_utilization, Asset, AssetType, Compliance, Criticality, FrameworkCategory,
    FrameworkFunction, MaturityTier, MitigationTier, RiskBand, SecurityCategory, ThreatEntry,
    ThreatLevel, DEFAULT_BUDGET, HIGH_RISK_THRESHOLD,
};
pub use operation::{OperationError, OperationKind, OperationState, OperationTracker};
pub use query::{overview, query, QueryResult};
pub use record::{AssetFacet, FrameworkFacet, InvestmentFacet, Record, ThreatFacet};
pub use store::snapshot::{SnapshotError, SnapshotFile, SnapshotFormat, Stores};
pub use store::{InMemoryRecordStore, RecordStore, Snapshot, StoreError, StoreResult};
