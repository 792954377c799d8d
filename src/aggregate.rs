//! # Aggregation Engine
//! Pure folds over a collection of normalized postings into the summary
//! tables the dashboard renders. Every function is side-effect-free and
//! recomputed per call; empty input always yields a defined sentinel
//! (empty list, `None` mode, `0.0` share) instead of an error.
//!
//! Tie-breaking contract: equal counts rank by first-encountered input
//! order (stable sort); equal salary-group means rank by key.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{NormalizedPosting, RoleCategory};

/// Placeholder key for postings without a city, mirroring what the charts
/// display.
const UNKNOWN_KEY: &str = "Unknown";

/// One row of a ranked frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub key: String,
    pub count: usize,
}

/// Per-group salary statistics. Groups below the caller's minimum sample
/// size never make it into a ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRow {
    pub key: String,
    pub mean: f64,
    pub median: f64,
    pub n: usize,
}

/// Daily posting volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub count: usize,
}

/// Headline salary metrics over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryOverview {
    /// Share of postings carrying a usable salary, one decimal.
    pub with_salary_pct: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// A direct employer with its posting count and most-mentioned skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyBreakdownRow {
    pub company: String,
    pub offers: usize,
    pub top_skills: Vec<String>,
}

/// The key-insight numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub total_offers: usize,
    pub top_skill: Option<String>,
    pub top_company: Option<String>,
    pub top_city: Option<String>,
    pub top_city_share_pct: f64,
    /// Most common role, `Other` excluded.
    pub top_role: Option<String>,
    pub remote_share_pct: f64,
    pub skill_coverage_pct: f64,
}

/// Count occurrences of each key, ranked by count descending. The sort is
/// stable over first-encountered order, which is the documented tie-break.
pub fn ranked_counts<I>(keys: I) -> Vec<CountRow>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CountRow> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(CountRow { key, count: 1 });
            }
        }
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Most frequent key, or `None` for an empty collection. Never divides by
/// zero, never panics.
pub fn safe_mode<I>(keys: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    ranked_counts(keys).into_iter().next().map(|r| r.key)
}

/// Percentage of postings matching `pred`, rounded to one decimal; `0.0`
/// over an empty collection.
pub fn share_pct<F>(postings: &[NormalizedPosting], pred: F) -> f64
where
    F: Fn(&NormalizedPosting) -> bool,
{
    if postings.is_empty() {
        return 0.0;
    }
    let matching = postings.iter().filter(|p| pred(p)).count();
    round1(100.0 * matching as f64 / postings.len() as f64)
}

/// Share of postings in a named city, case-insensitive and trimmed.
pub fn city_share_pct(postings: &[NormalizedPosting], city: &str) -> f64 {
    let wanted = city.trim().to_lowercase();
    share_pct(postings, |p| {
        p.city
            .as_deref()
            .is_some_and(|c| c.trim().to_lowercase() == wanted)
    })
}

/// Skill mention counts over the exploded skill sets.
pub fn top_skills(postings: &[NormalizedPosting], limit: usize) -> Vec<CountRow> {
    let mut rows = ranked_counts(
        postings
            .iter()
            .flat_map(|p| p.skills.iter().cloned()),
    );
    rows.truncate(limit);
    rows
}

/// City posting counts; postings without a city group under "Unknown".
pub fn top_cities(postings: &[NormalizedPosting], limit: usize) -> Vec<CountRow> {
    let mut rows = ranked_counts(postings.iter().map(|p| {
        p.city
            .clone()
            .unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }));
    rows.truncate(limit);
    rows
}

/// Company posting counts over the filtered (direct-employer) set.
pub fn top_companies(postings: &[NormalizedPosting], limit: usize) -> Vec<CountRow> {
    let mut rows = ranked_counts(postings.iter().map(|p| {
        p.raw
            .company
            .clone()
            .unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }));
    rows.truncate(limit);
    rows
}

/// Posting counts per role, `Other` included.
pub fn role_distribution(postings: &[NormalizedPosting]) -> Vec<CountRow> {
    ranked_counts(postings.iter().map(|p| p.role.label().to_string()))
}

/// Most common role excluding `Other`, or `None` when nothing classified.
pub fn top_role(postings: &[NormalizedPosting]) -> Option<String> {
    safe_mode(
        postings
            .iter()
            .filter(|p| p.role != RoleCategory::Other)
            .map(|p| p.role.label().to_string()),
    )
}

/// Group salaried postings by city and rank the groups. Groups with fewer
/// than `min_n` samples are dropped as statistically unreliable.
pub fn salary_by_city(
    postings: &[NormalizedPosting],
    min_n: usize,
    limit: usize,
) -> Vec<SalaryRow> {
    let mut rows = grouped_salary(postings, |p| p.city.clone(), min_n);
    rows.truncate(limit);
    rows
}

/// Group salaried postings by role and rank the groups.
pub fn salary_by_role(postings: &[NormalizedPosting], min_n: usize) -> Vec<SalaryRow> {
    grouped_salary(postings, |p| Some(p.role.label().to_string()), min_n)
}

/// Shared group-by fold: postings without a salary or without a group key
/// are skipped; surviving groups are ranked by mean descending, ties by key.
fn grouped_salary<F>(
    postings: &[NormalizedPosting],
    key_fn: F,
    min_n: usize,
) -> Vec<SalaryRow>
where
    F: Fn(&NormalizedPosting) -> Option<String>,
{
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for p in postings {
        let (Some(key), Some(value)) = (key_fn(p), p.salary_value) else {
            continue;
        };
        groups.entry(key).or_default().push(value);
    }

    let mut rows: Vec<SalaryRow> = groups
        .into_iter()
        .filter(|(_, values)| values.len() >= min_n.max(1))
        .map(|(key, values)| SalaryRow {
            n: values.len(),
            mean: mean(&values),
            median: median(values),
            key,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// Headline salary metrics; `None` means/medians when nothing has a salary.
pub fn salary_overview(postings: &[NormalizedPosting]) -> SalaryOverview {
    let values: Vec<f64> = postings.iter().filter_map(|p| p.salary_value).collect();
    let with_salary_pct = share_pct(postings, |p| p.salary_value.is_some());
    if values.is_empty() {
        return SalaryOverview {
            with_salary_pct,
            mean: None,
            median: None,
        };
    }
    SalaryOverview {
        with_salary_pct,
        mean: Some(mean(&values)),
        median: Some(median(values)),
    }
}

/// Percentage of postings mentioning at least one tracked skill.
pub fn skill_coverage_pct(postings: &[NormalizedPosting]) -> f64 {
    share_pct(postings, |p| !p.skills.is_empty())
}

/// Posting counts per calendar date, sorted by date. Postings whose
/// timestamp is missing or unparsable are excluded from this aggregate only.
pub fn daily_volume(postings: &[NormalizedPosting]) -> Vec<TrendRow> {
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for p in postings {
        if let Some(date) = p.created_date() {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    let mut rows: Vec<TrendRow> = counts
        .into_iter()
        .map(|(date, count)| TrendRow { date, count })
        .collect();
    rows.sort_by_key(|r| r.date);
    rows
}

/// Companies ranked by posting count, each with its top-5 skills by mention
/// count.
pub fn company_breakdown(
    postings: &[NormalizedPosting],
    limit: usize,
) -> Vec<CompanyBreakdownRow> {
    let companies = top_companies(postings, limit);
    companies
        .into_iter()
        .map(|row| {
            let skills = ranked_counts(
                postings
                    .iter()
                    .filter(|p| p.raw.company.as_deref() == Some(row.key.as_str()))
                    .flat_map(|p| p.skills.iter().cloned()),
            );
            CompanyBreakdownRow {
                company: row.key,
                offers: row.count,
                top_skills: skills.into_iter().take(5).map(|r| r.key).collect(),
            }
        })
        .collect()
}

/// The filtered postings sorted newest-first, capped at `limit`. ISO-8601
/// timestamps order lexicographically; postings without one sort last.
pub fn latest_postings(postings: &[NormalizedPosting], limit: usize) -> Vec<NormalizedPosting> {
    let mut sorted: Vec<NormalizedPosting> = postings.to_vec();
    sorted.sort_by(|a, b| b.raw.created.cmp(&a.raw.created));
    sorted.truncate(limit);
    sorted
}

/// All key-insight numbers in one pass-friendly struct.
pub fn market_summary(postings: &[NormalizedPosting]) -> MarketSummary {
    let city_rows = top_cities(postings, usize::MAX);
    let (top_city, top_city_share_pct) = match city_rows.first() {
        Some(row) if !postings.is_empty() => (
            Some(row.key.clone()),
            round1(100.0 * row.count as f64 / postings.len() as f64),
        ),
        _ => (None, 0.0),
    };

    MarketSummary {
        total_offers: postings.len(),
        top_skill: safe_mode(postings.iter().flat_map(|p| p.skills.iter().cloned())),
        top_company: safe_mode(postings.iter().map(|p| {
            p.raw
                .company
                .clone()
                .unwrap_or_else(|| UNKNOWN_KEY.to_string())
        })),
        top_city,
        top_city_share_pct,
        top_role: top_role(postings),
        remote_share_pct: share_pct(postings, |p| p.is_remote),
        skill_coverage_pct: skill_coverage_pct(postings),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample median; the midpoint average for even-sized groups.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
