//! Job-Market Analytics Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the posting store, the periodic
//! Adzuna ingest task, and the metrics endpoint.
//!
//! See `README.md` for quickstart.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use empleo_radar::api::{create_router, AppState};
use empleo_radar::ingest::config::AdzunaConfig;
use empleo_radar::ingest::scheduler::{spawn_ingest_scheduler, IngestSchedulerCfg};
use empleo_radar::store::PostingStore;
use empleo_radar::telemetry::Telemetry;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("empleo_radar=info,ingest=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let telemetry = Telemetry::init();
    let store = Arc::new(PostingStore::new_default());

    // Without credentials the service still serves its (empty) API, so the
    // dashboard can be developed against seeded or fixture data.
    match AdzunaConfig::from_env() {
        Ok(cfg) => {
            let interval_secs = std::env::var("INGEST_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(1800);
            spawn_ingest_scheduler(
                IngestSchedulerCfg { interval_secs },
                cfg,
                store.clone(),
            );
        }
        Err(e) => {
            tracing::warn!(error = ?e, "ingest disabled; serving store as-is");
        }
    }

    let state = AppState { store };
    let app = create_router(state).merge(telemetry.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
