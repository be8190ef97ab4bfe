pub mod config;
pub mod endpoints;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod sources;

use std::sync::Arc;

use config::ClientConfig;
use errors::CoreError;
use fetch::cache::{DataWatch, ResponseCache};
use models::outage::OutageSummary;
use models::profit::{ProfitMarginData, ProfitMarginQuery};
use models::report::Report;
use models::spending::{SpendingData, SpendingQuery};
use models::suburb::Suburb;
use models::user::User;
use sources::traits::DataSource;

/// Main entry point for the dashboard data layer.
///
/// Owns the response cache and the configured data source. Both dashboards
/// (consumer and retailer/operator) construct one of these at startup and
/// read everything through it; the cache lives and dies with the client, not
/// in module-level state.
#[must_use]
pub struct DashboardClient {
    source: Arc<dyn DataSource>,
    cache: ResponseCache,
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("source", &self.source.name())
            .field("cached_keys", &self.cache.cached_keys())
            .finish()
    }
}

impl DashboardClient {
    /// Build a client from configuration: the cache revalidates on the
    /// configured poll interval, and `DATA_SOURCE` picks the backing source.
    pub fn from_config(config: &ClientConfig) -> Self {
        let cache = ResponseCache::new(config.poll_interval());
        let source = sources::from_config(config, cache.clone());
        Self { source, cache }
    }

    /// Use an explicit source and cache, for tests or embedders bringing
    /// their own transport. Pass the same cache handle the source was built
    /// with so `clear_cache` reaches it.
    pub fn with_source(source: Arc<dyn DataSource>, cache: ResponseCache) -> Self {
        Self { source, cache }
    }

    /// Name of the active data source (for logs and diagnostics).
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    // ── One-shot accessors ──────────────────────────────────────────

    /// Spending history for the consumer dashboard.
    pub async fn spending(&self, query: &SpendingQuery) -> Result<SpendingData, CoreError> {
        self.source.spending(query).await
    }

    /// Selling/spot/profit series for the retailer dashboard.
    pub async fn profit_margin(
        &self,
        query: &ProfitMarginQuery,
    ) -> Result<ProfitMarginData, CoreError> {
        self.source.profit_margin(query).await
    }

    /// Generated billing reports.
    pub async fn reports(&self) -> Result<Vec<Report>, CoreError> {
        self.source.reports().await
    }

    /// Current outage roll-up across suburbs.
    pub async fn outages(&self) -> Result<OutageSummary, CoreError> {
        self.source.outages().await
    }

    /// Suburbs known to the operator.
    pub async fn suburbs(&self) -> Result<Vec<Suburb>, CoreError> {
        self.source.suburbs().await
    }

    /// Accounts shown in the operator's user table.
    pub async fn users(&self) -> Result<Vec<User>, CoreError> {
        self.source.users().await
    }

    // ── Live views ──────────────────────────────────────────────────

    /// Spending as a live view, refreshed on the poll interval for as long
    /// as the returned watch is held.
    pub fn watch_spending(&self, query: &SpendingQuery) -> DataWatch<SpendingData> {
        self.source.watch_spending(query)
    }

    /// Profit margin as a live view, refreshed on the poll interval.
    pub fn watch_profit_margin(&self, query: &ProfitMarginQuery) -> DataWatch<ProfitMarginData> {
        self.source.watch_profit_margin(query)
    }

    // ── Cache management ────────────────────────────────────────────

    /// Drop every cached response; subsequent reads refetch.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of keys currently holding a cached response.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.cache.cached_keys()
    }
}
