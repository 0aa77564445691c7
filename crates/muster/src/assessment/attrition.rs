use serde::{Deserialize, Serialize};

use crate::roster::PersonnelRecord;

/// Coarse three-tier estimate of separation likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttritionRisk {
    Low,
    Medium,
    High,
}

impl AttritionRisk {
    pub const fn label(self) -> &'static str {
        match self {
            AttritionRisk::Low => "Low",
            AttritionRisk::Medium => "Medium",
            AttritionRisk::High => "High",
        }
    }

    pub const fn ordered() -> [AttritionRisk; 3] {
        [AttritionRisk::Low, AttritionRisk::Medium, AttritionRisk::High]
    }
}

/// Raw risk accumulator. Each factor contributes independently; the band
/// boundaries are exact: age 45 stays in the +1 band, 46 moves to +2.
pub fn attrition_points(record: &PersonnelRecord) -> u8 {
    let mut points = 0;

    if record.age > 45.0 {
        points += 2;
    } else if record.age > 40.0 {
        points += 1;
    }

    if record.experience > 15.0 {
        points += 2;
    } else if record.experience > 10.0 {
        points += 1;
    }

    if !record.is_medically_fit() {
        points += 1;
    }

    if record.training_score < 70.0 {
        points += 1;
    }

    if PersonnelRecord::field_matches(&record.mission_readiness, "not ready") {
        points += 1;
    }

    points
}

pub fn attrition_risk(record: &PersonnelRecord) -> AttritionRisk {
    match attrition_points(record) {
        points if points >= 4 => AttritionRisk::High,
        points if points >= 2 => AttritionRisk::Medium,
        _ => AttritionRisk::Low,
    }
}
