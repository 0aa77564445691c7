//! Roster ingestion: delimited personnel exports into `PersonnelRecord`s.
//!
//! Ingestion is all-or-nothing for structural failures (no data rows) and
//! report-but-continue for per-row anomalies: short rows are dropped and
//! non-numeric values coerced to zero, each leaving a `RowAnomaly` behind.

mod defaults;
pub mod domain;
mod normalizer;

pub use defaults::{
    FieldSampler, FixedFieldSampler, RandomFieldSampler, LEADERSHIP_TIERS, MEDICAL_STATUSES,
    MISSION_READINESS_STATES, SKILL_LEVELS,
};
pub use domain::{AnomalyKind, PersonnelRecord, RosterIngest, RowAnomaly};

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use normalizer::normalize_header;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    /// Fewer than two non-blank lines: there is no data row to ingest.
    #[error("roster export needs a header row and at least one data row (found {lines} non-blank line(s))")]
    MalformedInput { lines: usize },
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>, S: FieldSampler>(
        path: P,
        sampler: &mut S,
    ) -> Result<RosterIngest, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, sampler)
    }

    /// Single read-to-completion; no streaming or partial ingestion.
    pub fn from_reader<R: Read, S: FieldSampler>(
        mut reader: R,
        sampler: &mut S,
    ) -> Result<RosterIngest, RosterImportError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text, sampler)
    }

    pub fn from_text<S: FieldSampler>(
        text: &str,
        sampler: &mut S,
    ) -> Result<RosterIngest, RosterImportError> {
        let non_blank = text.lines().filter(|line| !line.trim().is_empty()).count();
        if non_blank < 2 {
            return Err(RosterImportError::MalformedInput { lines: non_blank });
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();

        let mut records = Vec::new();
        let mut anomalies = Vec::new();

        for (index, raw) in csv_reader.records().enumerate() {
            let row = index + 1;
            let raw = raw?;

            if raw.len() != headers.len() {
                anomalies.push(RowAnomaly {
                    row,
                    kind: AnomalyKind::FieldCountMismatch {
                        expected: headers.len(),
                        found: raw.len(),
                    },
                });
                continue;
            }

            let mut fields: HashMap<String, String> = HashMap::with_capacity(headers.len());
            for (header, value) in headers.iter().zip(raw.iter()) {
                if header.is_empty() || value.trim().is_empty() {
                    continue;
                }
                fields.insert(header.clone(), value.trim().to_string());
            }

            records.push(build_record(&fields, row, sampler, &mut anomalies));
        }

        tracing::debug!(
            records = records.len(),
            anomalies = anomalies.len(),
            "roster export ingested"
        );

        Ok(RosterIngest { records, anomalies })
    }
}

fn build_record<S: FieldSampler>(
    fields: &HashMap<String, String>,
    row: usize,
    sampler: &mut S,
    anomalies: &mut Vec<RowAnomaly>,
) -> PersonnelRecord {
    let text = |aliases: &[&str]| normalizer::resolve(fields, aliases).map(str::to_string);

    let mut numeric = |aliases: &[&str], field: &'static str, fallback: f64| match normalizer::resolve(
        fields, aliases,
    ) {
        Some(value) => value.parse::<f64>().unwrap_or_else(|_| {
            anomalies.push(RowAnomaly {
                row,
                kind: AnomalyKind::NonNumericField {
                    field,
                    value: value.to_string(),
                },
            });
            0.0
        }),
        None => fallback,
    };

    let experience = numeric(normalizer::EXPERIENCE_ALIASES, "experience", sampler.experience());
    let age = numeric(normalizer::AGE_ALIASES, "age", sampler.age());
    let training_score = numeric(
        normalizer::TRAINING_SCORE_ALIASES,
        "training_score",
        sampler.training_score(),
    );

    let extra: BTreeMap<String, String> = fields
        .iter()
        .filter(|(header, _)| !normalizer::is_named_attribute(header))
        .map(|(header, value)| (header.clone(), value.clone()))
        .collect();

    PersonnelRecord {
        id: text(normalizer::ID_ALIASES).unwrap_or_else(|| format!("PER{row:04}")),
        name: text(normalizer::NAME_ALIASES).unwrap_or_else(|| format!("Service Member {row}")),
        rank: text(normalizer::RANK_ALIASES).unwrap_or_else(|| "Unspecified".to_string()),
        branch: text(normalizer::BRANCH_ALIASES).unwrap_or_else(|| "Unspecified".to_string()),
        specialization: text(normalizer::SPECIALIZATION_ALIASES)
            .unwrap_or_else(|| "General".to_string()),
        experience,
        age,
        training_score,
        medical_status: text(normalizer::MEDICAL_STATUS_ALIASES)
            .unwrap_or_else(|| sampler.medical_status().to_string()),
        mission_readiness: text(normalizer::MISSION_READINESS_ALIASES)
            .unwrap_or_else(|| sampler.mission_readiness().to_string()),
        skill_level: text(normalizer::SKILL_LEVEL_ALIASES)
            .unwrap_or_else(|| sampler.skill_level().to_string()),
        leadership_potential: text(normalizer::LEADERSHIP_ALIASES)
            .unwrap_or_else(|| sampler.leadership_potential().to_string()),
        last_deployment: text(normalizer::LAST_DEPLOYMENT_ALIASES)
            .as_deref()
            .and_then(parse_date),
        extra,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest(text: &str) -> RosterIngest {
        RosterImporter::from_text(text, &mut FixedFieldSampler).expect("ingest succeeds")
    }

    #[test]
    fn round_trips_named_fields_across_header_variants() {
        for header in ["id,name,rank", "ID,Name,Rank", "Id,Full Name,grade"] {
            let ingest = ingest(&format!("{header}\nA-1,Rivera,Sergeant\n"));
            assert_eq!(ingest.records.len(), 1);
            let record = &ingest.records[0];
            assert_eq!(record.id, "A-1");
            assert_eq!(record.name, "Rivera");
            assert_eq!(record.rank, "Sergeant");
        }
    }

    #[test]
    fn header_only_input_is_malformed() {
        let error = RosterImporter::from_text("id,name,rank\n", &mut FixedFieldSampler)
            .expect_err("no data rows");
        assert!(matches!(
            error,
            RosterImportError::MalformedInput { lines: 1 }
        ));
    }

    #[test]
    fn blank_lines_do_not_count_toward_the_minimum() {
        let error = RosterImporter::from_text("\n\nid,name\n   \n", &mut FixedFieldSampler)
            .expect_err("still only a header");
        assert!(matches!(
            error,
            RosterImportError::MalformedInput { lines: 1 }
        ));
    }

    #[test]
    fn short_rows_are_skipped_and_reported() {
        let ingest = ingest("id,name,rank\nA-1,Rivera,Sergeant\nA-2,Chen\nA-3,Okafor,Corporal\n");
        assert_eq!(ingest.records.len(), 2);
        assert_eq!(ingest.records[1].id, "A-3");
        assert_eq!(
            ingest.anomalies,
            vec![RowAnomaly {
                row: 2,
                kind: AnomalyKind::FieldCountMismatch {
                    expected: 3,
                    found: 2
                },
            }]
        );
    }

    #[test]
    fn non_numeric_values_coerce_to_zero_with_anomaly() {
        let ingest = ingest("id,age\nA-1,forty\n");
        assert_eq!(ingest.records[0].age, 0.0);
        assert_eq!(
            ingest.anomalies,
            vec![RowAnomaly {
                row: 1,
                kind: AnomalyKind::NonNumericField {
                    field: "age",
                    value: "forty".to_string()
                },
            }]
        );
    }

    #[test]
    fn missing_columns_fall_back_to_sampler_and_placeholders() {
        let ingest = ingest("name\nRivera\nChen\n");
        let second = &ingest.records[1];
        assert_eq!(second.id, "PER0002");
        assert_eq!(second.specialization, "General");
        assert_eq!(second.rank, "Unspecified");
        assert_eq!(second.experience, 1.0);
        assert_eq!(second.age, 20.0);
        assert_eq!(second.training_score, 50.0);
        assert_eq!(second.medical_status, "Fit");
        assert_eq!(second.mission_readiness, "Ready");
        assert_eq!(second.skill_level, "Expert");
        assert_eq!(second.leadership_potential, "High");
        assert!(ingest.anomalies.is_empty());
    }

    #[test]
    fn empty_cells_fall_back_like_missing_columns() {
        let ingest = ingest("id,name,age\nA-1,Rivera,\n");
        assert_eq!(ingest.records[0].age, 20.0);
        assert!(ingest.anomalies.is_empty());
    }

    #[test]
    fn quoted_fields_and_extra_columns_are_preserved() {
        let ingest = ingest("id,name,Home Base\nA-1,\"Rivera, Ana\",Fort Hood\n");
        let record = &ingest.records[0];
        assert_eq!(record.name, "Rivera, Ana");
        assert_eq!(record.extra.get("homebase").map(String::as_str), Some("Fort Hood"));
    }

    #[test]
    fn last_deployment_accepts_dates_and_timestamps() {
        let ingest = ingest(
            "id,last deployment\nA-1,2024-05-01\nA-2,2024-05-01T08:30:00Z\nA-3,not-a-date\n",
        );
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(ingest.records[0].last_deployment, expected);
        assert_eq!(ingest.records[1].last_deployment, expected);
        assert_eq!(ingest.records[2].last_deployment, None);
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = RosterImporter::from_path("./does-not-exist.csv", &mut FixedFieldSampler)
            .expect_err("expected io error");
        assert!(matches!(error, RosterImportError::Io(_)));
    }
}
