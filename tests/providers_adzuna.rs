// tests/providers_adzuna.rs
//
// Fixture-driven provider test: a captured search page parses into posting
// records, and those records flow through the normalization pipeline.

use empleo_radar::ingest::providers::adzuna::AdzunaProvider;
use empleo_radar::ingest::types::PostingProvider;
use empleo_radar::model::RoleCategory;
use empleo_radar::normalize::normalize_all;

const FIXTURE: &str = include_str!("fixtures/adzuna_search.json");

#[tokio::test]
async fn fixture_page_parses_into_postings() {
    let provider = AdzunaProvider::from_fixture_str(FIXTURE);
    let postings = provider.fetch_latest().await.expect("parse fixture");
    assert_eq!(postings.len(), 5);

    let first = &postings[0];
    assert_eq!(first.id, "4660151239");
    assert_eq!(first.company.as_deref(), Some("TechCorp"));
    // HTML and entities are cleaned at the provider boundary.
    assert_eq!(
        first.description.as_deref(),
        Some("We are hiring a Data Analyst. SQL and Power BI required. Hybrid setup in Madrid.")
    );
    assert!(!first.salary_is_predicted);

    // adref fallback when redirect_url is absent.
    let third = &postings[2];
    assert!(third.url.as_deref().unwrap().contains("4660151241"));
    assert!(!third.salary_is_predicted);
}

#[tokio::test]
async fn fixture_postings_survive_the_expected_filters() {
    let provider = AdzunaProvider::from_fixture_str(FIXTURE);
    let postings = provider.fetch_latest().await.expect("parse fixture");
    let normalized = normalize_all(&postings);

    // Of the five fixture jobs: the job board, the staffing agency, and the
    // country-level-only listing are filtered out.
    let ids: Vec<&str> = normalized.iter().map(|p| p.raw.id.as_str()).collect();
    assert_eq!(ids, vec!["4660151239", "4660151241"]);

    let analyst = &normalized[0];
    assert_eq!(analyst.city.as_deref(), Some("Madrid"));
    assert_eq!(analyst.role, RoleCategory::BiAnalyst);
    assert!(analyst.is_remote, "hybrid mention flags remote");
    assert_eq!(analyst.salary_value, Some(35_000.0));

    let scientist = &normalized[1];
    assert_eq!(scientist.role, RoleCategory::DataScientist);
    assert!(scientist.is_remote);
    assert!(scientist.skills.contains(&"python".to_string()));
    assert!(scientist.skills.contains(&"machine learning".to_string()));
}
