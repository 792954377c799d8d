//! model.rs — typed posting records and classification tags.
//!
//! The upstream API hands back loosely-typed JSON; everything nullable there
//! stays an `Option` here so each transform states what it tolerates instead
//! of poking at ad hoc columns.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A job posting as stored after ingestion, prior to any classification.
///
/// `id` is the upstream identifier and is unique across postings fetched over
/// time; every other field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPosting {
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    /// Creation timestamp as delivered by the API (ISO-8601, not validated).
    pub created: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub salary_is_predicted: bool,
    pub salary_interval: Option<String>,
    pub currency: Option<String>,
}

/// Employer category assigned by the company classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    Unknown,
    JobBoard,
    StaffingConsulting,
    DirectEmployer,
}

/// Role taxonomy for job titles. Variants serialize with the display labels
/// the dashboard charts group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "BI Analyst")]
    BiAnalyst,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    Other,
}

impl RoleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RoleCategory::DataEngineer => "Data Engineer",
            RoleCategory::DataScientist => "Data Scientist",
            RoleCategory::BiAnalyst => "BI Analyst",
            RoleCategory::DataAnalyst => "Data Analyst",
            RoleCategory::Other => "Other",
        }
    }
}

/// A posting that survived filtering, carrying its derived attributes.
///
/// Derived fresh on every pipeline run; the wrapped `raw` record is never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPosting {
    pub raw: RawPosting,
    pub company_type: CompanyType,
    pub city: Option<String>,
    pub role: RoleCategory,
    /// Sorted, duplicate-free subset of the skill vocabulary.
    pub skills: Vec<String>,
    pub is_remote: bool,
    /// Mean of the positive salary bounds, when any exist.
    pub salary_value: Option<f64>,
}

impl NormalizedPosting {
    /// Calendar date of the creation timestamp, if it parses.
    ///
    /// Accepts RFC-3339 (`2024-05-01T09:30:00Z`) and the offset-less variant
    /// some feeds emit. Unparsable timestamps yield `None`; callers that
    /// aggregate by date skip those records.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.raw.created.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.date())
            .ok()
    }
}
