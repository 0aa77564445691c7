use serde::Serialize;

use crate::assessment::AttritionRisk;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub band: &'static str,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTierCount {
    pub tier: AttritionRisk,
    pub tier_label: &'static str,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecommendation {
    pub recommendation: &'static str,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationCount {
    pub specialization: String,
    pub count: usize,
}

/// Full population summary over the filtered roster. Percentages always use
/// the filtered population as denominator; an empty population reports every
/// count and percentage as zero.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub population: usize,
    pub ranks: Vec<CategoryCount>,
    pub specializations: Vec<CategoryCount>,
    pub skill_levels: Vec<CategoryCount>,
    pub medical_statuses: Vec<CategoryCount>,
    pub mission_readiness: Vec<CategoryCount>,
    pub leadership_potential: Vec<CategoryCount>,
    pub age_bands: Vec<BandCount>,
    pub experience_bands: Vec<BandCount>,
    pub training_score_bands: Vec<BandCount>,
    pub readiness_score_bands: Vec<BandCount>,
    pub risk_tiers: Vec<RiskTierCount>,
    pub top_recommendations: Vec<RankedRecommendation>,
    pub top_specializations: Vec<SpecializationCount>,
}
