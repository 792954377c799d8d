// src/classify/skills.rs
//! Skill vocabulary and whole-word extraction over posting text.

use once_cell::sync::Lazy;
use regex::Regex;

/// The tracked skill vocabulary. Lower-case terms and phrases; multi-word
/// entries must appear as contiguous phrases in the text to count.
pub const SKILL_VOCABULARY: &[&str] = &[
    "sql",
    "python",
    "power bi",
    "tableau",
    "excel",
    "pandas",
    "numpy",
    "spark",
    "databricks",
    "azure",
    "aws",
    "gcp",
    "snowflake",
    "dbt",
    "airflow",
    "git",
    "docker",
    "machine learning",
    "statistics",
    "etl",
    "api",
    "postgresql",
    "mysql",
];

/// One compiled whole-word matcher per vocabulary term.
static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let pat = format!(r"(?iu)\b{}\b", regex::escape(skill));
            (*skill, Regex::new(&pat).expect("skill pattern"))
        })
        .collect()
});

/// Scan text for vocabulary terms. Returns the sorted, duplicate-free list
/// of matches; empty input yields an empty list. The final sort makes the
/// result independent of vocabulary order.
pub fn extract_skills(text: Option<&str>) -> Vec<String> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Vec::new(),
    };
    let mut found: Vec<String> = SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}
