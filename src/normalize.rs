//! # Record Normalizer
//! Pure per-posting pipeline: pre-filter → company classification → city →
//! role/skills/remote over the combined text → salary. No I/O, no shared
//! state, so the order records are processed in can never change any single
//! record's derived attributes.
//!
//! Data-quality problems are never errors here: missing fields fall back to
//! defined defaults, and postings that fail a filter simply produce `None`.

use crate::classify::{
    classify_company, classify_role, extract_city, extract_skills, is_remote, location,
    prefilter_company,
};
use crate::model::{CompanyType, NormalizedPosting, RawPosting};

/// Title and description concatenated with a separator; the haystack for
/// role, skill and remote detection.
pub fn combined_text(raw: &RawPosting) -> String {
    format!(
        "{} {}",
        raw.title.as_deref().unwrap_or_default(),
        raw.description.as_deref().unwrap_or_default()
    )
}

/// Mean of the positive salary bounds. A bound that is missing or
/// non-positive is ignored; with no usable bound the result is `None`.
pub fn salary_value(raw: &RawPosting) -> Option<f64> {
    let bounds: Vec<f64> = [raw.salary_min, raw.salary_max]
        .into_iter()
        .flatten()
        .filter(|v| *v > 0.0)
        .collect();
    if bounds.is_empty() {
        return None;
    }
    Some(bounds.iter().sum::<f64>() / bounds.len() as f64)
}

/// Normalize one posting, or `None` when a filter excludes it:
/// unusable company name, non-direct employer, or a country-level-only
/// location.
pub fn normalize_posting(raw: &RawPosting) -> Option<NormalizedPosting> {
    if !prefilter_company(raw.company.as_deref()) {
        return None;
    }

    let company_type = classify_company(raw.company.as_deref());
    if company_type != CompanyType::DirectEmployer {
        return None;
    }

    let city = extract_city(raw.location.as_deref());
    if let Some(c) = &city {
        if location::is_country_level(c) {
            return None;
        }
    }

    let text = combined_text(raw);

    Some(NormalizedPosting {
        raw: raw.clone(),
        company_type,
        city,
        role: classify_role(Some(&text)),
        skills: extract_skills(Some(&text)),
        is_remote: is_remote(Some(&text)),
        salary_value: salary_value(raw),
    })
}

/// Normalize a collection, preserving input order for the survivors.
/// Input order only affects downstream tie-breaking, never any individual
/// record.
pub fn normalize_all(raws: &[RawPosting]) -> Vec<NormalizedPosting> {
    raws.iter().filter_map(normalize_posting).collect()
}
