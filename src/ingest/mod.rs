// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod scheduler;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::ingest::types::PostingProvider;
use crate::store::PostingStore;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_postings_total",
            "Total postings parsed from providers."
        );
        describe_counter!("ingest_new_total", "Postings newly inserted into the store.");
        describe_counter!("ingest_dup_total", "Postings skipped as already-seen ids.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Provider parse time in milliseconds.");
        describe_gauge!("store_postings", "Postings currently held in the store.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
    });
}

/// Clean a description fragment: decode HTML entities, strip tags, collapse
/// whitespace, cap the length. The upstream API truncates descriptions
/// anyway; the cap only guards against pathological payloads.
pub fn clean_description(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    if out.chars().count() > 5000 {
        out = out.chars().take(5000).collect();
    }

    out
}

/// Run ingest once: fetch from every provider and insert into the store
/// with id-dedup. Returns `(inserted, skipped, provider_errors)`.
pub async fn run_once(
    providers: &[Box<dyn PostingProvider>],
    store: &PostingStore,
) -> (usize, usize, usize) {
    ensure_metrics_described();

    let mut raw = Vec::new();
    let mut errors = 0usize;
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => raw.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
                errors += 1;
            }
        }
    }

    let (inserted, skipped) = store.insert_batch(raw);

    // Telemetry
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("ingest_new_total").increment(inserted as u64);
    counter!("ingest_dup_total").increment(skipped as u64);
    gauge!("store_postings").set(store.len() as f64);
    gauge!("ingest_pipeline_last_run_ts").set(now as f64);

    (inserted, skipped, errors)
}
