use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::traits::JsonFetcher;
use crate::errors::CoreError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP GET fetcher backed by a shared reqwest client.
///
/// Failure split, in order:
/// - no response at all → [`CoreError::Transport`]
/// - response with a non-success status → [`CoreError::HttpStatus`] carrying
///   the status code and the body text (or a placeholder when the body itself
///   cannot be read)
/// - a 2xx body that is not valid JSON → [`CoreError::Parse`]
///
/// No retries here; a new attempt happens only on the next poll tick or when
/// the caller re-invokes.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let builder = Client::builder().timeout(timeout);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, CoreError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(CoreError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::Parse(format!("invalid JSON from {url}: {e}")))
    }
}
