use chrono::NaiveDate;

use crate::roster::PersonnelRecord;

pub const CORE_SKILLS_REFRESHER: &str = "Core Skills Refresher Training";
pub const ADVANCED_TECHNICAL: &str = "Advanced Technical Training";
pub const LEADERSHIP_DEVELOPMENT: &str = "Leadership Development Program";
pub const MISSION_READINESS_ASSESSMENT: &str = "Mission Readiness Assessment";
pub const DEPLOYMENT_READINESS: &str = "Deployment Readiness Training";
pub const MAINTENANCE: &str = "Maintenance Training";

/// Days without a deployment before refresher training is suggested.
const STALE_DEPLOYMENT_DAYS: i64 = 365;

/// Rule-evaluated, order-significant recommendations. The reference date is
/// injected so the function stays deterministic under test; only the
/// deployment-staleness rule consumes it. Always non-empty: when no rule
/// fires the sole entry is maintenance training.
pub fn training_recommendations(record: &PersonnelRecord, today: NaiveDate) -> Vec<&'static str> {
    let mut recommendations = Vec::new();

    if record.training_score < 70.0 {
        recommendations.push(CORE_SKILLS_REFRESHER);
    }

    let skill = record.skill_level.trim();
    if skill.eq_ignore_ascii_case("beginner") || skill.eq_ignore_ascii_case("intermediate") {
        recommendations.push(ADVANCED_TECHNICAL);
    }

    if PersonnelRecord::field_matches(&record.leadership_potential, "high")
        && record.experience > 5.0
    {
        recommendations.push(LEADERSHIP_DEVELOPMENT);
    }

    if PersonnelRecord::field_matches(&record.mission_readiness, "training") {
        recommendations.push(MISSION_READINESS_ASSESSMENT);
    }

    if let Some(last_deployment) = record.last_deployment {
        if (today - last_deployment).num_days() > STALE_DEPLOYMENT_DAYS {
            recommendations.push(DEPLOYMENT_READINESS);
        }
    }

    if recommendations.is_empty() {
        recommendations.push(MAINTENANCE);
    }

    recommendations
}
