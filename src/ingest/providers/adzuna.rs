use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::ingest::config::AdzunaConfig;
use crate::ingest::types::PostingProvider;
use crate::model::RawPosting;

const BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: Option<String>,
    title: Option<String>,
    company: Option<AdzunaCompany>,
    location: Option<AdzunaLocation>,
    category: Option<AdzunaCategory>,
    created: Option<String>,
    description: Option<String>,
    redirect_url: Option<String>,
    adref: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    /// The API encodes this as the string "1"/"0".
    salary_is_predicted: Option<String>,
    salary_interval: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCompany {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaLocation {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdzunaCategory {
    label: Option<String>,
}

pub struct AdzunaProvider {
    mode: Mode,
}

enum Mode {
    /// A captured search-page payload, for tests and offline runs.
    Fixture(String),
    Http {
        cfg: AdzunaConfig,
        client: reqwest::Client,
    },
}

impl AdzunaProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_config(cfg: AdzunaConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            mode: Mode::Http { cfg, client },
        }
    }

    fn parse_page_str(s: &str) -> Result<Vec<RawPosting>> {
        let t0 = std::time::Instant::now();
        let page: SearchPage = serde_json::from_str(s).context("parsing adzuna search page")?;
        let out = map_page(page);

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_postings_total").increment(out.len() as u64);
        Ok(out)
    }

    async fn fetch_page(
        client: &reqwest::Client,
        cfg: &AdzunaConfig,
        keyword: &str,
        page: u32,
    ) -> Result<SearchPage> {
        let url = format!("{BASE_URL}/{}/search/{page}", cfg.country);
        let resp = client
            .get(&url)
            .query(&[
                ("app_id", cfg.app_id.as_str()),
                ("app_key", cfg.app_key.as_str()),
                ("what", keyword),
            ])
            .query(&[("results_per_page", cfg.results_per_page)])
            .send()
            .await
            .context("adzuna http get()")?;
        let resp = resp.error_for_status().context("adzuna http status")?;
        resp.json::<SearchPage>().await.context("adzuna http .json()")
    }
}

/// Map a decoded search page into posting records. Results without an id
/// are skipped; descriptions are cleaned at this boundary so the core only
/// ever sees plain text.
fn map_page(page: SearchPage) -> Vec<RawPosting> {
    let mut out = Vec::with_capacity(page.results.len());
    for job in page.results {
        let Some(id) = job.id.filter(|id| !id.is_empty()) else {
            continue;
        };
        out.push(RawPosting {
            id,
            title: job.title,
            company: job.company.and_then(|c| c.display_name),
            location: job.location.and_then(|l| l.display_name),
            category: job.category.and_then(|c| c.label),
            created: job.created,
            description: job
                .description
                .map(|d| crate::ingest::clean_description(&d)),
            url: job.redirect_url.or(job.adref),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            salary_is_predicted: job.salary_is_predicted.as_deref() == Some("1"),
            salary_interval: job.salary_interval,
            currency: job.currency,
        });
    }
    out
}

#[async_trait]
impl PostingProvider for AdzunaProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_page_str(s),

            Mode::Http { cfg, client } => {
                let mut out = Vec::new();
                for keyword in &cfg.keywords {
                    for page in 1..=cfg.max_pages_per_keyword {
                        let decoded = match Self::fetch_page(client, cfg, keyword, page).await {
                            Ok(p) => p,
                            Err(e) => {
                                tracing::warn!(
                                    error = ?e,
                                    provider = "Adzuna",
                                    keyword = %keyword,
                                    page,
                                    "provider http error"
                                );
                                counter!("ingest_provider_errors_total").increment(1);
                                break;
                            }
                        };
                        if decoded.results.is_empty() {
                            break;
                        }
                        let mapped = map_page(decoded);
                        counter!("ingest_postings_total").increment(mapped.len() as u64);
                        out.extend(mapped);
                    }
                }
                Ok(out)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Adzuna"
    }
}
