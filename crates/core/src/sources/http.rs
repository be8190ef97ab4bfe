use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::traits::DataSource;
use crate::endpoints;
use crate::errors::CoreError;
use crate::fetch::cache::{decode, DataWatch, ResponseCache};
use crate::fetch::traits::JsonFetcher;
use crate::models::outage::OutageSummary;
use crate::models::profit::{ProfitMarginData, ProfitMarginQuery};
use crate::models::report::Report;
use crate::models::spending::{SpendingData, SpendingQuery};
use crate::models::suburb::Suburb;
use crate::models::user::User;

/// Backend-backed data source.
///
/// Every accessor builds its URL, goes through the shared [`ResponseCache`]
/// (so concurrent readers of the same key share one request), and decodes
/// the cached JSON into the typed payload.
pub struct HttpDataSource {
    base_url: String,
    cache: ResponseCache,
    fetcher: Arc<dyn JsonFetcher>,
}

impl HttpDataSource {
    pub fn new(
        base_url: impl Into<String>,
        cache: ResponseCache,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            cache,
            fetcher,
        }
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, CoreError> {
        let value = self.cache.get(&self.fetcher, url).await?;
        decode(&value)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn spending(&self, query: &SpendingQuery) -> Result<SpendingData, CoreError> {
        self.get_typed(&endpoints::spending_url(&self.base_url, query))
            .await
    }

    async fn profit_margin(
        &self,
        query: &ProfitMarginQuery,
    ) -> Result<ProfitMarginData, CoreError> {
        self.get_typed(&endpoints::profit_margin_url(&self.base_url, query))
            .await
    }

    async fn reports(&self) -> Result<Vec<Report>, CoreError> {
        self.get_typed(&endpoints::reports_url(&self.base_url)).await
    }

    async fn outages(&self) -> Result<OutageSummary, CoreError> {
        self.get_typed(&endpoints::outages_url(&self.base_url)).await
    }

    async fn suburbs(&self) -> Result<Vec<Suburb>, CoreError> {
        self.get_typed(&endpoints::suburbs_url(&self.base_url)).await
    }

    async fn users(&self) -> Result<Vec<User>, CoreError> {
        self.get_typed(&endpoints::users_url(&self.base_url)).await
    }

    fn watch_spending(&self, query: &SpendingQuery) -> DataWatch<SpendingData> {
        let url = endpoints::spending_url(&self.base_url, query);
        DataWatch::new(self.cache.subscribe(&self.fetcher, &url))
    }

    fn watch_profit_margin(&self, query: &ProfitMarginQuery) -> DataWatch<ProfitMarginData> {
        let url = endpoints::profit_margin_url(&self.base_url, query);
        DataWatch::new(self.cache.subscribe(&self.fetcher, &url))
    }
}
