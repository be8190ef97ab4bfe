use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;

/// Trait abstraction over "GET this URL and give me its JSON body".
///
/// The cache layer and the HTTP-backed data source are written against this
/// seam, so tests can swap in scripted fetchers without touching a network.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, CoreError>;
}
