//! Loading record snapshots from documents.
//!
//! A snapshot document carries every record set. YAML is the default format;
//! files with a `.json` extension are parsed as JSON.

use super::{InMemoryRecordStore, StoreError};
use crate::models::{Asset, FrameworkFunction, SecurityCategory, ThreatEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

const BUILTIN_SNAPSHOT: &str = include_str!("../../data/sample_snapshot.yaml");

/// Errors that can occur while loading a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not a valid snapshot.
    #[error("Failed to parse snapshot: {0}")]
    Parse(String),
    /// The records violate a store invariant.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Document format of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl SnapshotFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }
}

/// Serialized form of the dashboard record sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Asset inventory.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Threat landscape.
    #[serde(default)]
    pub threats: Vec<ThreatEntry>,
    /// Framework functions and their control categories.
    #[serde(default)]
    pub framework: Vec<FrameworkFunction>,
    /// Security investment categories.
    #[serde(default)]
    pub investments: Vec<SecurityCategory>,
}

impl SnapshotFile {
    /// Parses a snapshot document.
    pub fn parse(contents: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        match format {
            SnapshotFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| SnapshotError::Parse(e.to_string()))
            }
            SnapshotFormat::Json => {
                serde_json::from_str(contents).map_err(|e| SnapshotError::Parse(e.to_string()))
            }
        }
    }

    /// Reads and parses a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = Self::parse(&contents, SnapshotFormat::from_path(path))?;
        info!(
            path = %path.display(),
            assets = snapshot.assets.len(),
            threats = snapshot.threats.len(),
            framework = snapshot.framework.len(),
            investments = snapshot.investments.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// The compiled-in sample snapshot.
    pub fn builtin() -> Result<Self, SnapshotError> {
        Self::parse(BUILTIN_SNAPSHOT, SnapshotFormat::Yaml)
    }

    /// Builds validated stores for every record set.
    pub fn into_stores(self) -> Result<Stores, SnapshotError> {
        Ok(Stores {
            assets: InMemoryRecordStore::from_records(self.assets)?,
            threats: InMemoryRecordStore::from_records(self.threats)?,
            framework: InMemoryRecordStore::from_records(self.framework)?,
            investments: InMemoryRecordStore::from_records(self.investments)?,
        })
    }
}

/// The stores backing a dashboard session.
pub struct Stores {
    /// Asset inventory store.
    pub assets: InMemoryRecordStore<Asset>,
    /// Threat landscape store.
    pub threats: InMemoryRecordStore<ThreatEntry>,
    /// Framework maturity store.
    pub framework: InMemoryRecordStore<FrameworkFunction>,
    /// Budget allocation store.
    pub investments: InMemoryRecordStore<SecurityCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThreatLevel;
    use crate::store::RecordStore;
    use std::io::Write;

    #[test]
    fn test_builtin_snapshot() {
        let stores = SnapshotFile::builtin().unwrap().into_stores().unwrap();
        assert_eq!(stores.assets.len(), 6);
        assert_eq!(stores.threats.len(), 6);
        assert_eq!(stores.framework.len(), 5);
        assert_eq!(stores.investments.len(), 5);
        assert_eq!(stores.assets.all()[0].id, "SRV-001");
        assert_eq!(stores.framework.all()[0].categories.len(), 6);
    }

    #[test]
    fn test_format_from_path() {
        let format = |p: &str| SnapshotFormat::from_path(Path::new(p));
        assert_eq!(format("a.json"), SnapshotFormat::Json);
        assert_eq!(format("a.JSON"), SnapshotFormat::Json);
        assert_eq!(format("a.yaml"), SnapshotFormat::Yaml);
        assert_eq!(format("snapshot"), SnapshotFormat::Yaml);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"assets": [{{"id": "SRV-9", "name": "Edge", "type": "server", "criticality": "low",
                "owner": "Ops", "location": "DC", "riskScore": 12, "lastUpdated": "2024-02-01",
                "vulnerabilities": 0, "compliance": "compliant"}}]}}"#
        )
        .unwrap();

        let snapshot = SnapshotFile::load(file.path()).unwrap();
        assert_eq!(snapshot.assets.len(), 1);
        assert!(snapshot.threats.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = SnapshotFile::load(Path::new("/nonexistent/snapshot.yaml")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn test_unknown_enum_value_is_parse_error() {
        let yaml = r#"
assets:
  - id: X-1
    name: Thing
    type: mainframe
    criticality: low
    owner: Ops
    location: DC
    riskScore: 1
    lastUpdated: 2024-01-01
    vulnerabilities: 0
    compliance: compliant
"#;
        let err = SnapshotFile::parse(yaml, SnapshotFormat::Yaml).unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
threats:
  - { name: Malware, probability: 85, impact: 75, mitigation: 90 }
  - { name: Malware, probability: 10, impact: 10, mitigation: 10 }
"#;
        let err = SnapshotFile::parse(yaml, SnapshotFormat::Yaml)
            .unwrap()
            .into_stores()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SnapshotError::Store(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn test_overfull_framework_category_rejected() {
        let yaml = r#"
framework:
  - id: detect
    name: Detect
    score: 72
    categories:
      - { name: Security Monitoring, score: 68, implemented: 23, total: 22 }
"#;
        let err = SnapshotFile::parse(yaml, SnapshotFormat::Yaml)
            .unwrap()
            .into_stores()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SnapshotError::Store(StoreError::Invalid { ref id, .. }) if id == "detect"
        ));
    }

    #[test]
    fn test_investment_risk_parses_lowercase() {
        let yaml = r#"
investments:
  - { name: Network Security, current: 250000, recommended: 320000, roi: 2.4, risk: medium }
"#;
        let snapshot = SnapshotFile::parse(yaml, SnapshotFormat::Yaml).unwrap();
        assert_eq!(snapshot.investments[0].risk, ThreatLevel::Medium);

        let capitalized = yaml.replace("medium", "Medium");
        let parsed = SnapshotFile::parse(&capitalized, SnapshotFormat::Yaml);
        assert!(parsed.is_err());
    }
}
