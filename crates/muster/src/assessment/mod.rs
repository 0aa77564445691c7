//! Per-record assessment: three independent, stateless rubrics over one
//! `PersonnelRecord`, plus a composite outcome for API and report views.

mod attrition;
mod readiness;
mod training;

pub use attrition::{attrition_points, attrition_risk, AttritionRisk};
pub use readiness::{readiness_breakdown, readiness_score, ReadinessFactor, ScoreComponent};
pub use training::{
    training_recommendations, ADVANCED_TECHNICAL, CORE_SKILLS_REFRESHER, DEPLOYMENT_READINESS,
    LEADERSHIP_DEVELOPMENT, MAINTENANCE, MISSION_READINESS_ASSESSMENT,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::roster::PersonnelRecord;

/// Assessment output describing the composite score and decision trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonnelAssessment {
    pub personnel_id: String,
    pub readiness_score: u8,
    pub components: Vec<ScoreComponent>,
    pub attrition_risk: AttritionRisk,
    pub recommendations: Vec<&'static str>,
}

/// Run all three rubrics against one record. Nothing is cached; callers
/// re-derive from the current collection on every read.
pub fn assess(record: &PersonnelRecord, today: NaiveDate) -> PersonnelAssessment {
    let (components, readiness_score) = readiness_breakdown(record);

    PersonnelAssessment {
        personnel_id: record.id.clone(),
        readiness_score,
        components,
        attrition_risk: attrition_risk(record),
        recommendations: training_recommendations(record, today),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Neutral baseline record; tests override the fields under scrutiny.
    pub(crate) fn record_with(mutate: impl FnOnce(&mut PersonnelRecord)) -> PersonnelRecord {
        let mut record = PersonnelRecord {
            id: "PER0001".to_string(),
            name: "Rivera".to_string(),
            rank: "Sergeant".to_string(),
            branch: "Army".to_string(),
            specialization: "Signals".to_string(),
            experience: 8.0,
            age: 30.0,
            training_score: 82.0,
            medical_status: "Fit".to_string(),
            mission_readiness: "Ready".to_string(),
            skill_level: "Advanced".to_string(),
            leadership_potential: "Medium".to_string(),
            last_deployment: None,
            extra: BTreeMap::new(),
        };
        mutate(&mut record);
        record
    }

    #[test]
    fn assessment_bundles_all_three_rubrics() {
        let record = record_with(|record| record.training_score = 65.0);
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let assessment = assess(&record, today);

        assert_eq!(assessment.personnel_id, "PER0001");
        assert_eq!(assessment.readiness_score, readiness_score(&record));
        assert_eq!(assessment.attrition_risk, attrition_risk(&record));
        assert_eq!(assessment.recommendations[0], CORE_SKILLS_REFRESHER);
        assert_eq!(assessment.components.len(), 4);
    }
}
