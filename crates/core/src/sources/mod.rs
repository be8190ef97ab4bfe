use std::sync::Arc;

use crate::config::{ClientConfig, SourceKind};
use crate::fetch::cache::ResponseCache;
use crate::fetch::http::HttpFetcher;
use crate::fetch::traits::JsonFetcher;

pub mod traits;

// Data source implementations
pub mod http;
pub mod mock;

/// Build the data source named by the configuration.
///
/// The cache handle is injected by the caller, so its lifecycle stays owned
/// by the application root rather than by whichever source happens to use it.
pub fn from_config(config: &ClientConfig, cache: ResponseCache) -> Arc<dyn traits::DataSource> {
    match config.source {
        SourceKind::Http => {
            let fetcher: Arc<dyn JsonFetcher> =
                Arc::new(HttpFetcher::with_timeout(config.http_timeout()));
            Arc::new(http::HttpDataSource::new(
                config.api_base_url.clone(),
                cache,
                fetcher,
            ))
        }
        SourceKind::Mock => Arc::new(mock::MockDataSource::new(config.mock_delay())),
    }
}
