//! Population analytics: grouped counts, banded distributions, and ranked
//! lists over the filtered roster. Every call re-derives from the records it
//! is handed; there is no cached or incremental path.

mod filter;
pub mod views;

pub use filter::RosterFilter;
pub use views::{
    BandCount, CategoryCount, RankedRecommendation, RiskTierCount, RosterSummary,
    SpecializationCount,
};

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::assessment::{self, AttritionRisk};
use crate::roster::PersonnelRecord;

const AGE_BANDS: &[(&str, f64)] = &[("<30", 30.0), ("30-39", 40.0), ("40-49", 50.0)];
const AGE_TOP_BAND: &str = "50+";
const EXPERIENCE_BANDS: &[(&str, f64)] = &[("0-4", 5.0), ("5-9", 10.0), ("10-14", 15.0)];
const EXPERIENCE_TOP_BAND: &str = "15+";
const SCORE_BANDS: &[(&str, f64)] = &[
    ("<60", 60.0),
    ("60-69", 70.0),
    ("70-79", 80.0),
    ("80-89", 90.0),
];
const SCORE_TOP_BAND: &str = "90-100";

const TOP_RECOMMENDATIONS: usize = 8;
const TOP_SPECIALIZATIONS: usize = 10;

/// Build the full summary over the records selected by `filter`. `today`
/// only feeds the deployment-staleness recommendation rule.
pub fn summarize(
    records: &[PersonnelRecord],
    filter: &RosterFilter,
    today: NaiveDate,
) -> RosterSummary {
    let selected = filter.apply(records);
    let population = selected.len();

    RosterSummary {
        population,
        ranks: categorical(&selected, population, |record| record.rank.as_str()),
        specializations: categorical(&selected, population, |record| {
            record.specialization.as_str()
        }),
        skill_levels: categorical(&selected, population, |record| record.skill_level.as_str()),
        medical_statuses: categorical(&selected, population, |record| {
            record.medical_status.as_str()
        }),
        mission_readiness: categorical(&selected, population, |record| {
            record.mission_readiness.as_str()
        }),
        leadership_potential: categorical(&selected, population, |record| {
            record.leadership_potential.as_str()
        }),
        age_bands: banded(&selected, population, AGE_BANDS, AGE_TOP_BAND, |record| {
            record.age
        }),
        experience_bands: banded(
            &selected,
            population,
            EXPERIENCE_BANDS,
            EXPERIENCE_TOP_BAND,
            |record| record.experience,
        ),
        training_score_bands: banded(
            &selected,
            population,
            SCORE_BANDS,
            SCORE_TOP_BAND,
            |record| record.training_score,
        ),
        readiness_score_bands: banded(
            &selected,
            population,
            SCORE_BANDS,
            SCORE_TOP_BAND,
            |record| f64::from(assessment::readiness_score(record)),
        ),
        risk_tiers: risk_tiers(&selected, population),
        top_recommendations: top_recommendations(&selected, population, today),
        top_specializations: top_specializations(&selected),
    }
}

fn pct(count: usize, population: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / population as f64;
    (raw * 10.0).round() / 10.0
}

fn categorical(
    selected: &[&PersonnelRecord],
    population: usize,
    field: impl Fn(&PersonnelRecord) -> &str,
) -> Vec<CategoryCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in selected {
        *counts.entry(field(record).trim().to_string()).or_default() += 1;
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value,
            count,
            pct: pct(count, population),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries
}

fn banded(
    selected: &[&PersonnelRecord],
    population: usize,
    bands: &[(&'static str, f64)],
    top_band: &'static str,
    value: impl Fn(&PersonnelRecord) -> f64,
) -> Vec<BandCount> {
    let mut counts = vec![0usize; bands.len() + 1];
    for record in selected {
        let v = value(record);
        let index = bands
            .iter()
            .position(|(_, upper)| v < *upper)
            .unwrap_or(bands.len());
        counts[index] += 1;
    }

    bands
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(top_band))
        .zip(counts)
        .map(|(band, count)| BandCount {
            band,
            count,
            pct: pct(count, population),
        })
        .collect()
}

fn risk_tiers(selected: &[&PersonnelRecord], population: usize) -> Vec<RiskTierCount> {
    let mut counts: HashMap<AttritionRisk, usize> = HashMap::new();
    for record in selected {
        *counts.entry(assessment::attrition_risk(record)).or_default() += 1;
    }

    AttritionRisk::ordered()
        .into_iter()
        .map(|tier| {
            let count = counts.get(&tier).copied().unwrap_or_default();
            RiskTierCount {
                tier,
                tier_label: tier.label(),
                count,
                pct: pct(count, population),
            }
        })
        .collect()
}

fn top_recommendations(
    selected: &[&PersonnelRecord],
    population: usize,
    today: NaiveDate,
) -> Vec<RankedRecommendation> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for record in selected {
        for recommendation in assessment::training_recommendations(record, today) {
            *counts.entry(recommendation).or_default() += 1;
        }
    }

    let mut ranked: Vec<RankedRecommendation> = counts
        .into_iter()
        .map(|(recommendation, count)| RankedRecommendation {
            recommendation,
            count,
            pct: pct(count, population),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.recommendation.cmp(b.recommendation))
    });
    ranked.truncate(TOP_RECOMMENDATIONS);
    ranked
}

fn top_specializations(selected: &[&PersonnelRecord]) -> Vec<SpecializationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in selected {
        *counts.entry(record.specialization.trim()).or_default() += 1;
    }

    let mut ranked: Vec<SpecializationCount> = counts
        .into_iter()
        .map(|(specialization, count)| SpecializationCount {
            specialization: specialization.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.specialization.cmp(&b.specialization))
    });
    ranked.truncate(TOP_SPECIALIZATIONS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::tests::record_with;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn squad() -> Vec<PersonnelRecord> {
        vec![
            record_with(|record| {
                record.id = "PER0001".to_string();
                record.rank = "Sergeant".to_string();
                record.age = 24.0;
                record.experience = 3.0;
                record.training_score = 55.0;
            }),
            record_with(|record| {
                record.id = "PER0002".to_string();
                record.rank = "Sergeant".to_string();
                record.age = 35.0;
                record.experience = 7.0;
                record.training_score = 75.0;
            }),
            record_with(|record| {
                record.id = "PER0003".to_string();
                record.rank = "Corporal".to_string();
                record.age = 44.0;
                record.experience = 12.0;
                record.training_score = 88.0;
            }),
            record_with(|record| {
                record.id = "PER0004".to_string();
                record.rank = "Major".to_string();
                record.age = 52.0;
                record.experience = 21.0;
                record.training_score = 95.0;
            }),
        ]
    }

    #[test]
    fn categorical_counts_sort_by_count_then_value() {
        let summary = summarize(&squad(), &RosterFilter::default(), today());
        assert_eq!(summary.population, 4);
        assert_eq!(summary.ranks[0].value, "Sergeant");
        assert_eq!(summary.ranks[0].count, 2);
        assert_eq!(summary.ranks[1].value, "Corporal");
        assert_eq!(summary.ranks[2].value, "Major");
    }

    #[test]
    fn percentages_sum_to_one_hundred_within_rounding() {
        let summary = summarize(&squad(), &RosterFilter::default(), today());
        for entries in [&summary.ranks, &summary.skill_levels, &summary.medical_statuses] {
            let total: f64 = entries.iter().map(|entry| entry.pct).sum();
            assert!((total - 100.0).abs() <= 0.5, "sum was {total}");
        }
        let tier_total: f64 = summary.risk_tiers.iter().map(|tier| tier.pct).sum();
        assert!((tier_total - 100.0).abs() <= 0.5);
    }

    #[test]
    fn bands_cover_every_record_once() {
        let summary = summarize(&squad(), &RosterFilter::default(), today());

        let age_counts: Vec<usize> = summary.age_bands.iter().map(|band| band.count).collect();
        assert_eq!(age_counts, vec![1, 1, 1, 1]);

        let exp_counts: Vec<usize> =
            summary.experience_bands.iter().map(|band| band.count).collect();
        assert_eq!(exp_counts, vec![1, 1, 1, 1]);

        let score_counts: Vec<usize> =
            summary.training_score_bands.iter().map(|band| band.count).collect();
        assert_eq!(score_counts, vec![1, 0, 1, 1, 1]);
    }

    #[test]
    fn filters_shrink_the_denominator() {
        let filter = RosterFilter {
            rank: Some("Sergeant".to_string()),
            ..RosterFilter::default()
        };
        let summary = summarize(&squad(), &filter, today());
        assert_eq!(summary.population, 2);
        assert_eq!(summary.ranks.len(), 1);
        assert_eq!(summary.ranks[0].pct, 100.0);
    }

    #[test]
    fn empty_population_reports_zeroes() {
        let summary = summarize(&[], &RosterFilter::default(), today());
        assert_eq!(summary.population, 0);
        assert!(summary.ranks.is_empty());
        assert!(summary.top_recommendations.is_empty());
        for band in &summary.age_bands {
            assert_eq!(band.count, 0);
            assert_eq!(band.pct, 0.0);
        }
    }

    #[test]
    fn recommendation_ranking_counts_population_share() {
        let summary = summarize(&squad(), &RosterFilter::default(), today());
        let refresher = summary
            .top_recommendations
            .iter()
            .find(|entry| entry.recommendation == crate::assessment::CORE_SKILLS_REFRESHER)
            .expect("low scorer produces a refresher recommendation");
        assert_eq!(refresher.count, 1);
        assert_eq!(refresher.pct, 25.0);
        assert!(summary.top_recommendations.len() <= 8);
    }
}
