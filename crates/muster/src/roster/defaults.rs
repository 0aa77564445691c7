//! Fallback values for columns absent from the source spreadsheet.
//!
//! The sampled defaults are a demo convenience carried over from the original
//! dashboard, not a data-integrity feature. They sit behind `FieldSampler` so
//! tests can substitute a deterministic source.

use rand::seq::IndexedRandom;
use rand::Rng;

pub const MEDICAL_STATUSES: &[&str] = &["Fit", "Limited Duty", "Under Review", "Unfit"];
pub const MISSION_READINESS_STATES: &[&str] = &["Ready", "Training", "Not Ready"];
pub const SKILL_LEVELS: &[&str] = &["Expert", "Advanced", "Intermediate", "Beginner"];
pub const LEADERSHIP_TIERS: &[&str] = &["High", "Medium", "Low"];

/// Source of fallback values for the seven demo-filled attributes.
pub trait FieldSampler {
    fn experience(&mut self) -> f64;
    fn age(&mut self) -> f64;
    fn training_score(&mut self) -> f64;
    fn medical_status(&mut self) -> &'static str;
    fn mission_readiness(&mut self) -> &'static str;
    fn skill_level(&mut self) -> &'static str;
    fn leadership_potential(&mut self) -> &'static str;
}

/// Production sampler: uniform draws from the fixed demo ranges.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFieldSampler;

impl FieldSampler for RandomFieldSampler {
    fn experience(&mut self) -> f64 {
        rand::rng().random_range(1..=20) as f64
    }

    fn age(&mut self) -> f64 {
        rand::rng().random_range(20..=50) as f64
    }

    fn training_score(&mut self) -> f64 {
        rand::rng().random_range(50..=100) as f64
    }

    fn medical_status(&mut self) -> &'static str {
        choose(MEDICAL_STATUSES)
    }

    fn mission_readiness(&mut self) -> &'static str {
        choose(MISSION_READINESS_STATES)
    }

    fn skill_level(&mut self) -> &'static str {
        choose(SKILL_LEVELS)
    }

    fn leadership_potential(&mut self) -> &'static str {
        choose(LEADERSHIP_TIERS)
    }
}

fn choose(values: &'static [&'static str]) -> &'static str {
    values
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(values[0])
}

/// Deterministic sampler returning the first element of every set; test
/// suites and reproducibility-sensitive callers inject this.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedFieldSampler;

impl FieldSampler for FixedFieldSampler {
    fn experience(&mut self) -> f64 {
        1.0
    }

    fn age(&mut self) -> f64 {
        20.0
    }

    fn training_score(&mut self) -> f64 {
        50.0
    }

    fn medical_status(&mut self) -> &'static str {
        MEDICAL_STATUSES[0]
    }

    fn mission_readiness(&mut self) -> &'static str {
        MISSION_READINESS_STATES[0]
    }

    fn skill_level(&mut self) -> &'static str {
        SKILL_LEVELS[0]
    }

    fn leadership_potential(&mut self) -> &'static str {
        LEADERSHIP_TIERS[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_sampler_stays_within_demo_ranges() {
        let mut sampler = RandomFieldSampler;
        for _ in 0..64 {
            let experience = sampler.experience();
            assert!((1.0..=20.0).contains(&experience));
            let age = sampler.age();
            assert!((20.0..=50.0).contains(&age));
            let score = sampler.training_score();
            assert!((50.0..=100.0).contains(&score));
            assert!(MEDICAL_STATUSES.contains(&sampler.medical_status()));
            assert!(MISSION_READINESS_STATES.contains(&sampler.mission_readiness()));
            assert!(SKILL_LEVELS.contains(&sampler.skill_level()));
            assert!(LEADERSHIP_TIERS.contains(&sampler.leadership_potential()));
        }
    }
}
