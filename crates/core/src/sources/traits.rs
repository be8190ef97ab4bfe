use async_trait::async_trait;

use crate::errors::CoreError;
use crate::fetch::cache::DataWatch;
use crate::models::outage::OutageSummary;
use crate::models::profit::{ProfitMarginData, ProfitMarginQuery};
use crate::models::report::Report;
use crate::models::spending::{SpendingData, SpendingQuery};
use crate::models::suburb::Suburb;
use crate::models::user::User;

/// Capability trait for everything the dashboards read.
///
/// Two implementations exist: [`HttpDataSource`](super::http::HttpDataSource)
/// against the real backend, and [`MockDataSource`](super::mock::MockDataSource)
/// with fixed fixtures. Configuration picks one at startup, so nothing
/// outside this module decides whether the data on screen is real.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Spending history for the consumer dashboard.
    async fn spending(&self, query: &SpendingQuery) -> Result<SpendingData, CoreError>;

    /// Selling/spot/profit series for the retailer dashboard.
    async fn profit_margin(
        &self,
        query: &ProfitMarginQuery,
    ) -> Result<ProfitMarginData, CoreError>;

    /// Generated billing reports.
    async fn reports(&self) -> Result<Vec<Report>, CoreError>;

    /// Current outage roll-up across suburbs.
    async fn outages(&self) -> Result<OutageSummary, CoreError>;

    /// Suburbs known to the operator.
    async fn suburbs(&self) -> Result<Vec<Suburb>, CoreError>;

    /// Accounts shown in the operator's user table.
    async fn users(&self) -> Result<Vec<User>, CoreError>;

    /// Spending as a live view, revalidated on the poll interval.
    fn watch_spending(&self, query: &SpendingQuery) -> DataWatch<SpendingData>;

    /// Profit margin as a live view, revalidated on the poll interval.
    fn watch_profit_margin(&self, query: &ProfitMarginQuery) -> DataWatch<ProfitMarginData>;
}
