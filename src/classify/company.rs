// src/classify/company.rs
//! Employer categorization and the pre-filter that removes postings whose
//! company field is unusable before classification even runs.

use crate::model::CompanyType;

/// Job-board brand names that appear verbatim in the company field.
const JOB_BOARD_NAMES: &[&str] = &["indeed", "linkedin", "infojobs", "jooble", "trabajos.com"];

/// Staffing / recruiting keywords, English and Spanish, matched as
/// substrings of the lowered name. Includes the big named agencies.
const STAFFING_KEYWORDS: &[&str] = &[
    "ett",
    "trabajo temporal",
    "consult",
    "recruit",
    "talent",
    "personnel",
    "rrhh",
    "selección",
    "manpower",
    "adecco",
    "randstad",
    "page personnel",
];

/// Categorize an employer name. First match wins, case-insensitive:
/// empty → `Unknown`, domain-like or board brand → `JobBoard`, staffing
/// keyword → `StaffingConsulting`, otherwise `DirectEmployer`.
pub fn classify_company(name: Option<&str>) -> CompanyType {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return CompanyType::Unknown,
    };
    let lower = name.to_lowercase();

    if lower.contains(".com") || lower.contains("indeed") || lower.contains("linkedin") {
        return CompanyType::JobBoard;
    }

    if STAFFING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return CompanyType::StaffingConsulting;
    }

    CompanyType::DirectEmployer
}

/// Pre-classification filter: `true` when the posting should stay in the
/// working set. Drops missing/blank names, the literal "unknown"
/// placeholder, `.com`-style domains, and exact job-board brand names.
pub fn prefilter_company(name: Option<&str>) -> bool {
    let name = match name {
        Some(n) => n.trim(),
        None => return false,
    };
    if name.is_empty() {
        return false;
    }
    let lower = name.to_lowercase();
    if lower == "unknown" || lower.contains(".com") {
        return false;
    }
    !JOB_BOARD_NAMES.contains(&lower.as_str())
}
