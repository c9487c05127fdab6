//! Progress tracking for long-running dashboard operations.
//!
//! Refreshing data, running a risk analysis, optimizing the portfolio, and
//! generating a report are modelled as operations moving through
//! `Idle -> Running -> Settled`. An operation that is running cannot be started
//! again until it settles. None of them is cancellable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Dashboard operations that report progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Reload the dashboard data.
    RefreshData,
    /// Re-run the threat analysis.
    RunRiskAnalysis,
    /// Optimize budget allocation.
    RunOptimization,
    /// Produce a report.
    GenerateReport,
}

impl OperationKind {
    /// Every operation kind.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::RefreshData,
        OperationKind::RunRiskAnalysis,
        OperationKind::RunOptimization,
        OperationKind::GenerateReport,
    ];

    /// How long the simulated backend work takes.
    pub fn simulated_delay(&self) -> Duration {
        match self {
            OperationKind::RefreshData => Duration::from_millis(1500),
            OperationKind::RunRiskAnalysis => Duration::from_millis(2500),
            OperationKind::RunOptimization => Duration::from_millis(3000),
            OperationKind::GenerateReport => Duration::from_millis(3000),
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "refresh" | "refresh_data" => Some(OperationKind::RefreshData),
            "analysis" | "run_risk_analysis" => Some(OperationKind::RunRiskAnalysis),
            "optimization" | "run_optimization" => Some(OperationKind::RunOptimization),
            "report" | "generate_report" => Some(OperationKind::GenerateReport),
            _ => None,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::RefreshData => "refresh_data",
            OperationKind::RunRiskAnalysis => "run_risk_analysis",
            OperationKind::RunOptimization => "run_optimization",
            OperationKind::GenerateReport => "generate_report",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::RefreshData => write!(f, "Refresh Data"),
            OperationKind::RunRiskAnalysis => write!(f, "Run Analysis"),
            OperationKind::RunOptimization => write!(f, "Run Optimization"),
            OperationKind::GenerateReport => write!(f, "Generate Report"),
        }
    }
}

/// Progress of a single operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OperationState {
    /// Never started.
    #[default]
    Idle,
    /// In progress.
    Running {
        /// When the operation started.
        started_at: DateTime<Utc>,
    },
    /// Finished.
    Settled {
        /// When the operation started.
        started_at: DateTime<Utc>,
        /// When the operation finished.
        settled_at: DateTime<Utc>,
    },
}

impl OperationState {
    /// Whether the operation is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, OperationState::Running { .. })
    }
}

/// Errors raised by invalid progress transitions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OperationError {
    /// The operation was started while a previous run is still in flight.
    #[error("Operation already running: {0}")]
    AlreadyRunning(OperationKind),

    /// The operation was settled without being started.
    #[error("Operation not running: {0}")]
    NotRunning(OperationKind),
}

/// Shared tracker of operation progress.
#[derive(Clone, Default)]
pub struct OperationTracker {
    states: Arc<RwLock<HashMap<OperationKind, OperationState>>>,
}

impl OperationTracker {
    /// Creates a tracker with every operation idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `kind`.
    pub async fn state(&self, kind: OperationKind) -> OperationState {
        let states = self.states.read().await;
        states.get(&kind).copied().unwrap_or_default()
    }

    /// Marks `kind` as running.
    pub async fn start(&self, kind: OperationKind) -> Result<DateTime<Utc>, OperationError> {
        let mut states = self.states.write().await;
        let state = states.entry(kind).or_default();
        if state.is_running() {
            return Err(OperationError::AlreadyRunning(kind));
        }
        let started_at = Utc::now();
        *state = OperationState::Running { started_at };
        info!(operation = kind.as_str(), "operation started");
        Ok(started_at)
    }

    /// Marks a running `kind` as settled.
    pub async fn settle(&self, kind: OperationKind) -> Result<OperationState, OperationError> {
        let mut states = self.states.write().await;
        let state = states.entry(kind).or_default();
        let OperationState::Running { started_at } = *state else {
            return Err(OperationError::NotRunning(kind));
        };
        *state = OperationState::Settled {
            started_at,
            settled_at: Utc::now(),
        };
        info!(operation = kind.as_str(), "operation settled");
        Ok(*state)
    }

    /// Starts `kind`, waits `delay`, then settles it.
    #[instrument(skip(self), fields(operation = kind.as_str()))]
    pub async fn run(
        &self,
        kind: OperationKind,
        delay: Duration,
    ) -> Result<OperationState, OperationError> {
        self.start(kind).await?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.settle(kind).await
    }

    /// Kinds currently running.
    pub async fn running(&self) -> Vec<OperationKind> {
        let states = self.states.read().await;
        OperationKind::ALL
            .into_iter()
            .filter(|k| states.get(k).is_some_and(|s| s.is_running()))
            .collect()
    }
}
