use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::aggregate::{
    self, CompanyBreakdownRow, CountRow, MarketSummary, SalaryOverview, SalaryRow, TrendRow,
};
use crate::model::NormalizedPosting;
use crate::normalize::normalize_all;
use crate::store::PostingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostingStore>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/summary", get(summary))
        .route("/api/skills/top", get(skills_top))
        .route("/api/cities/top", get(cities_top))
        .route("/api/companies/top", get(companies_top))
        .route("/api/companies/breakdown", get(companies_breakdown))
        .route("/api/roles", get(roles))
        .route("/api/salary/overview", get(salary_overview))
        .route("/api/salary/by-city", get(salary_by_city))
        .route("/api/salary/by-role", get(salary_by_role))
        .route("/api/trend", get(trend))
        .route("/api/postings", get(postings))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Snapshot the store and run the full normalization pipeline. Aggregates
/// are derived fresh on every request; the store holds no derived state.
fn filtered(state: &AppState) -> Vec<NormalizedPosting> {
    normalize_all(&state.store.snapshot())
}

#[derive(Deserialize)]
struct TopQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SalaryQuery {
    min_n: Option<usize>,
    limit: Option<usize>,
}

const DEFAULT_MIN_SAMPLES: usize = 10;

async fn summary(State(state): State<AppState>) -> Json<MarketSummary> {
    Json(aggregate::market_summary(&filtered(&state)))
}

async fn skills_top(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Json<Vec<CountRow>> {
    Json(aggregate::top_skills(&filtered(&state), q.limit.unwrap_or(10)))
}

async fn cities_top(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Json<Vec<CountRow>> {
    Json(aggregate::top_cities(&filtered(&state), q.limit.unwrap_or(10)))
}

async fn companies_top(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Json<Vec<CountRow>> {
    Json(aggregate::top_companies(
        &filtered(&state),
        q.limit.unwrap_or(20),
    ))
}

async fn companies_breakdown(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Json<Vec<CompanyBreakdownRow>> {
    Json(aggregate::company_breakdown(
        &filtered(&state),
        q.limit.unwrap_or(50),
    ))
}

async fn roles(State(state): State<AppState>) -> Json<Vec<CountRow>> {
    Json(aggregate::role_distribution(&filtered(&state)))
}

async fn salary_overview(State(state): State<AppState>) -> Json<SalaryOverview> {
    Json(aggregate::salary_overview(&filtered(&state)))
}

async fn salary_by_city(
    State(state): State<AppState>,
    Query(q): Query<SalaryQuery>,
) -> Json<Vec<SalaryRow>> {
    Json(aggregate::salary_by_city(
        &filtered(&state),
        q.min_n.unwrap_or(DEFAULT_MIN_SAMPLES),
        q.limit.unwrap_or(10),
    ))
}

async fn salary_by_role(
    State(state): State<AppState>,
    Query(q): Query<SalaryQuery>,
) -> Json<Vec<SalaryRow>> {
    Json(aggregate::salary_by_role(
        &filtered(&state),
        q.min_n.unwrap_or(DEFAULT_MIN_SAMPLES),
    ))
}

async fn trend(State(state): State<AppState>) -> Json<Vec<TrendRow>> {
    Json(aggregate::daily_volume(&filtered(&state)))
}

/// Flat row shape for the raw-data table view.
#[derive(Serialize)]
struct PostingRow {
    created: Option<String>,
    title: Option<String>,
    company: Option<String>,
    city: Option<String>,
    role: &'static str,
    skills: Vec<String>,
    is_remote: bool,
    salary_value: Option<f64>,
    category: Option<String>,
    url: Option<String>,
}

async fn postings(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Json<Vec<PostingRow>> {
    let rows = aggregate::latest_postings(&filtered(&state), q.limit.unwrap_or(200))
        .into_iter()
        .map(|p| PostingRow {
            created: p.raw.created.clone(),
            title: p.raw.title.clone(),
            company: p.raw.company.clone(),
            city: p.city.clone(),
            role: p.role.label(),
            skills: p.skills.clone(),
            is_remote: p.is_remote,
            salary_value: p.salary_value,
            category: p.raw.category.clone(),
            url: p.raw.url.clone(),
        })
        .collect();
    Json(rows)
}
