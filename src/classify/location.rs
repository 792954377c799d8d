// src/classify/location.rs
//! City extraction from the free-text location field.
//!
//! The API returns locations as comma-separated administrative levels,
//! narrowest first ("Madrid, Comunidad de Madrid, España"), so the city is
//! the trimmed segment before the first comma.

/// Country names that mark a country-level-only listing. Postings whose
/// extracted city equals one of these carry no real city information and
/// are excluded from the working set by the normalizer.
const COUNTRY_NAMES: &[&str] = &["españa", "spain"];

/// Extract the city-level token, or `None` when the location is missing or
/// blank.
pub fn extract_city(location: Option<&str>) -> Option<String> {
    let location = location?.trim();
    if location.is_empty() {
        return None;
    }
    let city = location.split(',').next().unwrap_or(location).trim();
    if city.is_empty() {
        None
    } else {
        Some(city.to_string())
    }
}

/// `true` when the extracted city is really the country name.
pub fn is_country_level(city: &str) -> bool {
    let lower = city.trim().to_lowercase();
    COUNTRY_NAMES.contains(&lower.as_str())
}
