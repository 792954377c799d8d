// src/ingest/types.rs
use anyhow::Result;

use crate::model::RawPosting;

#[async_trait::async_trait]
pub trait PostingProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>>;
    fn name(&self) -> &'static str;
}
