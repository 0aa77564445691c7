use serde::Deserialize;

use crate::roster::PersonnelRecord;

/// Pure predicate composition applied before aggregation or listing.
///
/// `search` is a case-insensitive substring match over name, id, and
/// specialization. The categorical dimensions are exact (case-insensitive)
/// matches; the sentinel value `all` on any of them means "no filter".
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RosterFilter {
    pub search: Option<String>,
    pub rank: Option<String>,
    pub branch: Option<String>,
    pub specialization: Option<String>,
    pub medical_status: Option<String>,
    pub mission_readiness: Option<String>,
    pub skill_level: Option<String>,
    pub leadership_potential: Option<String>,
}

impl RosterFilter {
    /// Collapse `all` sentinels and blank values to "no filter".
    pub fn normalized(mut self) -> Self {
        for dimension in [
            &mut self.search,
            &mut self.rank,
            &mut self.branch,
            &mut self.specialization,
            &mut self.medical_status,
            &mut self.mission_readiness,
            &mut self.skill_level,
            &mut self.leadership_potential,
        ] {
            if let Some(value) = dimension {
                let trimmed = value.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
                    *dimension = None;
                }
            }
        }
        self
    }

    pub fn matches(&self, record: &PersonnelRecord) -> bool {
        if let Some(needle) = &self.search {
            let needle = needle.trim().to_lowercase();
            let haystacks = [&record.name, &record.id, &record.specialization];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        let exact = [
            (&self.rank, &record.rank),
            (&self.branch, &record.branch),
            (&self.specialization, &record.specialization),
            (&self.medical_status, &record.medical_status),
            (&self.mission_readiness, &record.mission_readiness),
            (&self.skill_level, &record.skill_level),
            (&self.leadership_potential, &record.leadership_potential),
        ];

        exact.iter().all(|(wanted, actual)| match wanted {
            Some(value) => PersonnelRecord::field_matches(actual, value.trim()),
            None => true,
        })
    }

    pub fn apply<'a>(&self, records: &'a [PersonnelRecord]) -> Vec<&'a PersonnelRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::tests::record_with;

    #[test]
    fn all_sentinel_and_blanks_mean_no_filter() {
        let filter = RosterFilter {
            rank: Some("All".to_string()),
            branch: Some("  ".to_string()),
            ..RosterFilter::default()
        }
        .normalized();

        assert!(filter.rank.is_none());
        assert!(filter.branch.is_none());
        assert!(filter.matches(&record_with(|_| {})));
    }

    #[test]
    fn search_spans_name_id_and_specialization() {
        let record = record_with(|record| {
            record.name = "Ana Rivera".to_string();
            record.id = "PER0042".to_string();
            record.specialization = "Cyber Operations".to_string();
        });

        for needle in ["rivera", "0042", "cyber"] {
            let filter = RosterFilter {
                search: Some(needle.to_string()),
                ..RosterFilter::default()
            };
            assert!(filter.matches(&record), "needle {needle}");
        }

        let filter = RosterFilter {
            search: Some("logistics".to_string()),
            ..RosterFilter::default()
        };
        assert!(!filter.matches(&record));
    }

    #[test]
    fn categorical_dimensions_compose() {
        let record = record_with(|record| {
            record.rank = "Sergeant".to_string();
            record.medical_status = "Fit".to_string();
        });

        let filter = RosterFilter {
            rank: Some("sergeant".to_string()),
            medical_status: Some("FIT".to_string()),
            ..RosterFilter::default()
        };
        assert!(filter.matches(&record));

        let filter = RosterFilter {
            rank: Some("sergeant".to_string()),
            medical_status: Some("Unfit".to_string()),
            ..RosterFilter::default()
        };
        assert!(!filter.matches(&record));
    }
}
