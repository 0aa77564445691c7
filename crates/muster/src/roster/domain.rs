use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single personnel row after normalization. `id` is unique within one
/// ingested collection; nothing is enforced across collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub branch: String,
    pub specialization: String,
    pub experience: f64,
    pub age: f64,
    pub training_score: f64,
    pub medical_status: String,
    pub mission_readiness: String,
    pub skill_level: String,
    pub leadership_potential: String,
    pub last_deployment: Option<NaiveDate>,
    /// Source columns with no named attribute, keyed by normalized header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PersonnelRecord {
    /// Case-insensitive comparison helper for the free-text categorical
    /// fields; every interpreter of these values goes through this.
    pub fn field_matches(value: &str, expected: &str) -> bool {
        value.trim().eq_ignore_ascii_case(expected)
    }

    pub fn is_medically_fit(&self) -> bool {
        Self::field_matches(&self.medical_status, "fit")
    }
}

/// Per-row recoverable problems found during ingestion. The batch still
/// succeeds; callers decide whether to surface these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowAnomaly {
    /// 1-based data-row index (the header row is not counted).
    pub row: usize,
    pub kind: AnomalyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnomalyKind {
    /// The row was dropped because its field count differs from the header.
    FieldCountMismatch { expected: usize, found: usize },
    /// A numeric field carried a non-numeric value and was coerced to zero.
    NonNumericField { field: &'static str, value: String },
}

impl AnomalyKind {
    pub fn describe(&self) -> String {
        match self {
            AnomalyKind::FieldCountMismatch { expected, found } => {
                format!("expected {expected} fields, found {found}; row skipped")
            }
            AnomalyKind::NonNumericField { field, value } => {
                format!("non-numeric {field} value '{value}' coerced to 0")
            }
        }
    }
}

/// Result of a successful ingestion: records in input order plus every
/// recovered per-row anomaly.
#[derive(Debug, Clone, Serialize)]
pub struct RosterIngest {
    pub records: Vec<PersonnelRecord>,
    pub anomalies: Vec<RowAnomaly>,
}

impl RosterIngest {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
