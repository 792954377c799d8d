// src/classify/role.rs
//! Role taxonomy over job-title text.
//!
//! The rule table is *ordered*: categories overlap (any BI title is also an
//! "analyst" title), so BI-specific terms must be checked before the generic
//! analyst patterns. The order below is a contract covered by tests, not an
//! accident of iteration.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::RoleCategory;

/// Priority-ordered (role, whole-word pattern) pairs, English and Spanish
/// synonyms per role. First match wins; no match means `Other`.
static ROLE_RULES: Lazy<Vec<(RoleCategory, Regex)>> = Lazy::new(|| {
    [
        (
            RoleCategory::DataEngineer,
            r"(?iu)\b(data engineer|data engineering|ingenier[oa] de datos|data platform)\b",
        ),
        (
            RoleCategory::DataScientist,
            r"(?iu)\b(data scientist|cient[ií]fic[oa] de datos|ml engineer|machine learning)\b",
        ),
        (
            RoleCategory::BiAnalyst,
            r"(?iu)\b(bi|business intelligence|power bi|tableau|qlik)\b",
        ),
        (
            RoleCategory::DataAnalyst,
            r"(?iu)\b(data analyst|analista de datos|analyst|analista|analytics)\b",
        ),
    ]
    .into_iter()
    .map(|(role, pat)| (role, Regex::new(pat).expect("role pattern")))
    .collect()
});

/// Classify text into a role tag. Missing text is `Other`.
pub fn classify_role(text: Option<&str>) -> RoleCategory {
    let text = match text {
        Some(t) => t,
        None => return RoleCategory::Other,
    };
    for (role, re) in ROLE_RULES.iter() {
        if re.is_match(text) {
            return *role;
        }
    }
    RoleCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_titles() {
        assert_eq!(
            classify_role(Some("Senior Data Engineer")),
            RoleCategory::DataEngineer
        );
        assert_eq!(
            classify_role(Some("Data Scientist (NLP)")),
            RoleCategory::DataScientist
        );
        assert_eq!(classify_role(Some("Data Analyst")), RoleCategory::DataAnalyst);
    }

    #[test]
    fn spanish_titles() {
        assert_eq!(
            classify_role(Some("Ingeniera de Datos")),
            RoleCategory::DataEngineer
        );
        assert_eq!(
            classify_role(Some("Científico de datos junior")),
            RoleCategory::DataScientist
        );
        assert_eq!(
            classify_role(Some("Analista de Datos")),
            RoleCategory::DataAnalyst
        );
    }

    #[test]
    fn bi_terms_win_over_generic_analyst() {
        assert_eq!(
            classify_role(Some("Power BI Analyst")),
            RoleCategory::BiAnalyst
        );
        assert_eq!(
            classify_role(Some("Business Intelligence Analyst")),
            RoleCategory::BiAnalyst
        );
        assert_eq!(classify_role(Some("Tableau analyst")), RoleCategory::BiAnalyst);
    }

    #[test]
    fn engineer_wins_over_scientist_and_bi() {
        // "data engineer ... machine learning" resolves by rule order.
        assert_eq!(
            classify_role(Some("Data Engineer with machine learning and Power BI")),
            RoleCategory::DataEngineer
        );
    }

    #[test]
    fn whole_words_only() {
        // "bi" must not match inside unrelated words.
        assert_eq!(classify_role(Some("Mobility lead")), RoleCategory::Other);
        assert_eq!(classify_role(Some("Bilingual teacher")), RoleCategory::Other);
        // but the standalone token does.
        assert_eq!(classify_role(Some("BI developer")), RoleCategory::BiAnalyst);
    }

    #[test]
    fn missing_or_unmatched_is_other() {
        assert_eq!(classify_role(None), RoleCategory::Other);
        assert_eq!(classify_role(Some("Frontend Developer")), RoleCategory::Other);
    }
}
