// src/ingest/scheduler.rs
use std::sync::Arc;

use metrics::counter;
use tokio::task::JoinHandle;

use crate::ingest::config::AdzunaConfig;
use crate::ingest::providers::adzuna::AdzunaProvider;
use crate::ingest::types::PostingProvider;
use crate::store::PostingStore;

#[derive(Clone, Copy, Debug)]
pub struct IngestSchedulerCfg {
    pub interval_secs: u64,
}

/// Spawn a periodic ingest task: every tick, sweep the configured keyword
/// set from Adzuna and fold the results into the store.
pub fn spawn_ingest_scheduler(
    cfg: IngestSchedulerCfg,
    adzuna: AdzunaConfig,
    store: Arc<PostingStore>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(cfg.interval_secs.max(60)));
        loop {
            ticker.tick().await;

            let providers: Vec<Box<dyn PostingProvider>> =
                vec![Box::new(AdzunaProvider::from_config(adzuna.clone()))];

            let (inserted, skipped, errors) =
                crate::ingest::run_once(&providers, &store).await;

            counter!("ingest_runs_total").increment(1);

            tracing::info!(
                target: "ingest",
                inserted,
                skipped,
                errors,
                store_len = store.len(),
                "ingest tick"
            );
        }
    })
}
