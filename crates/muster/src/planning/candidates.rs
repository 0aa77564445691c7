//! Suitability ranking for enrollment and assignment candidates.
//!
//! Both rankings share the same gates (not already on the roster, medically
//! fit, passes the caller's filter) and a keyword-relevance key computed from
//! the entity's name and focus against the candidate's specialization and
//! current training recommendations. They differ deliberately in the score
//! key: program enrollment orders training score ascending (neediest first),
//! mission assignment orders readiness descending (most capable first).

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Mission, TrainingProgram};
use crate::analytics::RosterFilter;
use crate::assessment;
use crate::roster::PersonnelRecord;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub personnel_id: String,
    pub name: String,
    pub specialization: String,
    pub training_score: f64,
    pub readiness_score: u8,
    pub relevance: usize,
}

pub fn rank_program_candidates(
    records: &[PersonnelRecord],
    program: &TrainingProgram,
    filter: &RosterFilter,
    today: NaiveDate,
    limit: usize,
) -> Vec<CandidateView> {
    let topic = keywords(&format!("{} {}", program.name, program.focus));
    let mut candidates = eligible(records, &program.enrolled, filter, today, &topic);
    candidates.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.training_score.total_cmp(&b.training_score))
            .then_with(|| a.personnel_id.cmp(&b.personnel_id))
    });
    candidates.truncate(limit);
    candidates
}

pub fn rank_mission_candidates(
    records: &[PersonnelRecord],
    mission: &Mission,
    filter: &RosterFilter,
    today: NaiveDate,
    limit: usize,
) -> Vec<CandidateView> {
    let topic = keywords(&format!("{} {}", mission.name, mission.objective));
    let mut candidates = eligible(records, &mission.roster, filter, today, &topic);
    candidates.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| b.readiness_score.cmp(&a.readiness_score))
            .then_with(|| a.personnel_id.cmp(&b.personnel_id))
    });
    candidates.truncate(limit);
    candidates
}

fn eligible(
    records: &[PersonnelRecord],
    roster: &[String],
    filter: &RosterFilter,
    today: NaiveDate,
    topic: &HashSet<String>,
) -> Vec<CandidateView> {
    records
        .iter()
        .filter(|record| !roster.contains(&record.id))
        .filter(|record| record.is_medically_fit())
        .filter(|record| filter.matches(record))
        .map(|record| {
            let mut profile = keywords(&record.specialization);
            for recommendation in assessment::training_recommendations(record, today) {
                profile.extend(keywords(recommendation));
            }

            CandidateView {
                personnel_id: record.id.clone(),
                name: record.name.clone(),
                specialization: record.specialization.clone(),
                training_score: record.training_score,
                readiness_score: assessment::readiness_score(record),
                relevance: topic.intersection(&profile).count(),
            }
        })
        .collect()
}

/// Lower-cased alphanumeric words of three or more characters; short filler
/// words carry no signal for topical overlap.
fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= 3)
        .map(str::to_lowercase)
        .collect()
}
