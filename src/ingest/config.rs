// src/ingest/config.rs
//! Adzuna credentials from the environment plus the search-keyword list,
//! loadable from TOML or JSON with an env-path override.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_APP_ID: &str = "ADZUNA_APP_ID";
pub const ENV_APP_KEY: &str = "ADZUNA_APP_KEY";
pub const ENV_COUNTRY: &str = "ADZUNA_COUNTRY";
pub const ENV_MAX_PAGES: &str = "ADZUNA_MAX_PAGES";
pub const ENV_KEYWORDS_PATH: &str = "SEARCH_KEYWORDS_PATH";

pub const DEFAULT_COUNTRY: &str = "es";
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 50;
pub const DEFAULT_MAX_PAGES: u32 = 3;

#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub app_id: String,
    pub app_key: String,
    pub country: String,
    pub results_per_page: u32,
    pub max_pages_per_keyword: u32,
    pub keywords: Vec<String>,
}

impl AdzunaConfig {
    /// Build from the environment. Credentials are required; everything
    /// else has defaults. Keyword list resolution: $SEARCH_KEYWORDS_PATH →
    /// config/search_keywords.toml → config/search_keywords.json →
    /// built-in seed.
    pub fn from_env() -> Result<Self> {
        let app_id = std::env::var(ENV_APP_ID)
            .map_err(|_| anyhow!("missing {ENV_APP_ID} in environment"))?;
        let app_key = std::env::var(ENV_APP_KEY)
            .map_err(|_| anyhow!("missing {ENV_APP_KEY} in environment"))?;

        let country = std::env::var(ENV_COUNTRY).unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());
        let max_pages_per_keyword = std::env::var(ENV_MAX_PAGES)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_PAGES)
            .max(1);

        let mut keywords = load_keywords_default()?;
        if keywords.is_empty() {
            keywords = seed_keywords();
        }

        Ok(Self {
            app_id,
            app_key,
            country,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            max_pages_per_keyword,
            keywords,
        })
    }
}

/// The keyword sweep the market snapshot is built from.
pub fn seed_keywords() -> Vec<String> {
    [
        "data analyst",
        "analista de datos",
        "business intelligence",
        "power bi",
        "sql",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Load keywords from an explicit path. Supports TOML or JSON formats.
pub fn load_keywords_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading keywords from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_keywords(&content, ext.as_str())
}

/// Load keywords using env var + fallbacks:
/// 1) $SEARCH_KEYWORDS_PATH
/// 2) config/search_keywords.toml
/// 3) config/search_keywords.json
pub fn load_keywords_default() -> Result<Vec<String>> {
    if let Ok(p) = std::env::var(ENV_KEYWORDS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_keywords_from(&pb);
        } else {
            return Err(anyhow!("SEARCH_KEYWORDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/search_keywords.toml");
    if toml_p.exists() {
        return load_keywords_from(&toml_p);
    }
    let json_p = PathBuf::from("config/search_keywords.json");
    if json_p.exists() {
        return load_keywords_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_keywords(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    let try_toml = hint_ext == "toml" || s.contains("keywords");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported keywords format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlKw {
        keywords: Vec<String>,
    }
    let v: TomlKw = toml::from_str(s)?;
    Ok(clean_list(v.keywords))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_lowercase());
        }
    }
    set.into_iter().collect()
}
