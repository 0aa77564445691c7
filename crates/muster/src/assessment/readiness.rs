use serde::Serialize;

use crate::roster::PersonnelRecord;

/// Factors permitted in the readiness rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessFactor {
    MedicalStatus,
    TrainingScore,
    Experience,
    SkillLevel,
}

/// Discrete contribution to a readiness score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ReadinessFactor,
    pub points: f64,
    pub notes: String,
}

/// Weighted composite in 0..=100: medical fitness (40), training score (30),
/// experience capped at 20 credited years (20), skill level (10).
pub fn readiness_score(record: &PersonnelRecord) -> u8 {
    let (_, score) = readiness_breakdown(record);
    score
}

pub fn readiness_breakdown(record: &PersonnelRecord) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::with_capacity(4);

    let medical = record.medical_status.trim();
    let medical_points = if medical.eq_ignore_ascii_case("fit") {
        40.0
    } else if medical.eq_ignore_ascii_case("limited duty") {
        25.0
    } else if medical.eq_ignore_ascii_case("under review") {
        10.0
    } else {
        20.0
    };
    components.push(ScoreComponent {
        factor: ReadinessFactor::MedicalStatus,
        points: medical_points,
        notes: format!("medical status '{medical}'"),
    });

    let training_points = record.training_score / 100.0 * 30.0;
    components.push(ScoreComponent {
        factor: ReadinessFactor::TrainingScore,
        points: training_points,
        notes: format!("training score {:.0}", record.training_score),
    });

    let experience_points = (record.experience / 20.0).min(1.0) * 20.0;
    components.push(ScoreComponent {
        factor: ReadinessFactor::Experience,
        points: experience_points,
        notes: format!("{:.0} year(s) of service, credited up to 20", record.experience),
    });

    let skill = record.skill_level.trim();
    let skill_points = if skill.eq_ignore_ascii_case("expert") {
        10.0
    } else if skill.eq_ignore_ascii_case("advanced") {
        8.0
    } else if skill.eq_ignore_ascii_case("intermediate") {
        6.0
    } else if skill.eq_ignore_ascii_case("beginner") {
        4.0
    } else {
        5.0
    };
    components.push(ScoreComponent {
        factor: ReadinessFactor::SkillLevel,
        points: skill_points,
        notes: format!("skill level '{skill}'"),
    });

    let total: f64 = components.iter().map(|component| component.points).sum();
    (components, total.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::tests::record_with;

    #[test]
    fn fully_qualified_record_scores_exactly_one_hundred() {
        let record = record_with(|record| {
            record.medical_status = "Fit".to_string();
            record.training_score = 100.0;
            record.experience = 20.0;
            record.skill_level = "Expert".to_string();
        });
        assert_eq!(readiness_score(&record), 100);
    }

    #[test]
    fn unknown_inputs_score_the_floor_of_twenty_five() {
        let record = record_with(|record| {
            record.medical_status = "on leave".to_string();
            record.training_score = 0.0;
            record.experience = 0.0;
            record.skill_level = String::new();
        });
        // 20 medical + 0 training + 0 experience + 5 skill
        assert_eq!(readiness_score(&record), 25);
    }

    #[test]
    fn categorical_matching_ignores_case() {
        let record = record_with(|record| {
            record.medical_status = "LIMITED DUTY".to_string();
            record.training_score = 0.0;
            record.experience = 0.0;
            record.skill_level = "advanced".to_string();
        });
        assert_eq!(readiness_score(&record), 33);
    }

    #[test]
    fn experience_credit_caps_at_twenty_years() {
        let twenty = record_with(|record| record.experience = 20.0);
        let forty = record_with(|record| record.experience = 40.0);
        assert_eq!(readiness_score(&twenty), readiness_score(&forty));
    }

    #[test]
    fn breakdown_components_sum_to_the_rounded_score() {
        let record = record_with(|record| {
            record.medical_status = "Fit".to_string();
            record.training_score = 77.0;
            record.experience = 7.0;
            record.skill_level = "Intermediate".to_string();
        });
        let (components, score) = readiness_breakdown(&record);
        assert_eq!(components.len(), 4);
        let total: f64 = components.iter().map(|component| component.points).sum();
        assert_eq!(total.round() as u8, score);
    }
}
