//! Header normalization and alias resolution for spreadsheet columns.
//!
//! Source spreadsheets disagree on spelling and spacing ("Training Score",
//! `training_score`, `TrainingScore`); all collapse to the same normalized
//! key before alias lookup.

/// Lower-case the header and strip every non-alphanumeric character. BOM and
/// zero-width characters fall out under the same rule.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Alias chains per logical attribute, highest priority first, in
/// normalized form.
pub(crate) const ID_ALIASES: &[&str] = &["id", "personnelid", "serviceid"];
pub(crate) const NAME_ALIASES: &[&str] = &["name", "fullname", "personnelname"];
pub(crate) const RANK_ALIASES: &[&str] = &["rank", "grade", "paygrade"];
pub(crate) const BRANCH_ALIASES: &[&str] = &["branch", "service", "component"];
pub(crate) const SPECIALIZATION_ALIASES: &[&str] = &["specialization", "specialty", "mos"];
pub(crate) const EXPERIENCE_ALIASES: &[&str] =
    &["experience", "yearsofservice", "yearsofexperience"];
pub(crate) const AGE_ALIASES: &[&str] = &["age"];
pub(crate) const TRAINING_SCORE_ALIASES: &[&str] = &["trainingscore", "score", "trainingresult"];
pub(crate) const MEDICAL_STATUS_ALIASES: &[&str] = &["medicalstatus", "medical", "fitnessstatus"];
pub(crate) const MISSION_READINESS_ALIASES: &[&str] =
    &["missionreadiness", "readiness", "readinessstatus"];
pub(crate) const SKILL_LEVEL_ALIASES: &[&str] = &["skilllevel", "skill", "proficiency"];
pub(crate) const LEADERSHIP_ALIASES: &[&str] = &["leadershippotential", "leadership"];
pub(crate) const LAST_DEPLOYMENT_ALIASES: &[&str] =
    &["lastdeployment", "lastdeployed", "lastdeploymentdate"];

/// Every alias that maps to a named record attribute; anything else a row
/// carries is preserved in `PersonnelRecord::extra`.
pub(crate) fn is_named_attribute(normalized: &str) -> bool {
    [
        ID_ALIASES,
        NAME_ALIASES,
        RANK_ALIASES,
        BRANCH_ALIASES,
        SPECIALIZATION_ALIASES,
        EXPERIENCE_ALIASES,
        AGE_ALIASES,
        TRAINING_SCORE_ALIASES,
        MEDICAL_STATUS_ALIASES,
        MISSION_READINESS_ALIASES,
        SKILL_LEVEL_ALIASES,
        LEADERSHIP_ALIASES,
        LAST_DEPLOYMENT_ALIASES,
    ]
    .iter()
    .any(|aliases| aliases.contains(&normalized))
}

/// Resolve the first alias present in the row, in priority order.
pub(crate) fn resolve<'a>(
    fields: &'a std::collections::HashMap<String, String>,
    aliases: &[&str],
) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| fields.get(*alias).map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_collapses_spelling_variants() {
        assert_eq!(normalize_header("Training Score"), "trainingscore");
        assert_eq!(normalize_header("training_score"), "trainingscore");
        assert_eq!(normalize_header("TrainingScore"), "trainingscore");
        assert_eq!(normalize_header(" Mission-Readiness "), "missionreadiness");
    }

    #[test]
    fn normalize_header_strips_bom_and_zero_width() {
        assert_eq!(normalize_header("\u{feff}Name"), "name");
        assert_eq!(normalize_header("Na\u{200b}me"), "name");
    }

    #[test]
    fn resolve_honors_priority_order() {
        let mut fields = std::collections::HashMap::new();
        fields.insert("grade".to_string(), "E-5".to_string());
        fields.insert("rank".to_string(), "Sergeant".to_string());
        assert_eq!(resolve(&fields, RANK_ALIASES), Some("Sergeant"));

        fields.remove("rank");
        assert_eq!(resolve(&fields, RANK_ALIASES), Some("E-5"));
    }
}
