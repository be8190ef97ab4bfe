use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use super::traits::DataSource;
use crate::errors::CoreError;
use crate::fetch::cache::DataWatch;
use crate::models::consumer::ConsumerId;
use crate::models::outage::{OutageSummary, SuburbOutage};
use crate::models::price::PricePoint;
use crate::models::profit::{ProfitMarginData, ProfitMarginQuery, ProfitSeries};
use crate::models::report::{Report, ReportSubject};
use crate::models::spending::{SpendingData, SpendingQuery};
use crate::models::suburb::Suburb;
use crate::models::user::User;

/// Stand-in for the backend routes that do not exist yet.
///
/// Returns the same hard-coded fixtures on every call, after an artificial
/// delay so loading states can be exercised. Parameters never affect the
/// result and there is no error path. A real deployment selects
/// [`HttpDataSource`](super::http::HttpDataSource) instead; nothing in this
/// file is part of the durable contract.
pub struct MockDataSource {
    delay: Duration,
}

impl MockDataSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default()
    }

    fn spending_fixture() -> SpendingData {
        let amounts = [12.5, 14.2, 11.8, 15.6, 13.1, 12.9, 16.4];
        SpendingData {
            start_date: Self::d(2024, 1, 1),
            end_date: Some(Self::d(2024, 1, 7)),
            consumer_id: Some(ConsumerId::Number(42)),
            spending: amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| PricePoint {
                    date: Self::d(2024, 1, 1 + i as u32),
                    amount: *amount,
                })
                .collect(),
        }
    }

    fn profit_margin_fixture() -> ProfitMarginData {
        let series = |amounts: [f64; 3]| -> Vec<PricePoint> {
            amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| PricePoint {
                    date: Self::d(2024, 1, 1 + i as u32),
                    amount: *amount,
                })
                .collect()
        };
        ProfitMarginData {
            start_date: Self::d(2024, 1, 1),
            end_date: Some(Self::d(2024, 1, 3)),
            values: ProfitSeries {
                selling_prices: series([0.32, 0.31, 0.33]),
                spot_prices: series([0.21, 0.24, 0.19]),
                profits: series([0.11, 0.07, 0.14]),
            },
        }
    }

    fn reports_fixture() -> Vec<Report> {
        vec![
            Report {
                id: 1,
                start_date: Self::d(2024, 1, 1),
                end_date: Self::d(2024, 1, 31),
                subject: ReportSubject {
                    suburb_id: 1,
                    consumer_id: ConsumerId::Number(42),
                },
            },
            Report {
                id: 2,
                start_date: Self::d(2024, 2, 1),
                end_date: Self::d(2024, 2, 29),
                subject: ReportSubject {
                    suburb_id: 2,
                    consumer_id: ConsumerId::Text("c-17".to_string()),
                },
            },
        ]
    }

    fn outages_fixture() -> OutageSummary {
        OutageSummary {
            suburbs: vec![
                SuburbOutage {
                    id: 1,
                    name: "Richmond".to_string(),
                    households: vec![
                        json!({ "id": 101, "address": "12 Swan St", "since": "2024-01-03T04:20:00Z" }),
                        json!({ "id": 102, "address": "7 Church St", "since": "2024-01-03T04:25:00Z" }),
                    ],
                },
                SuburbOutage {
                    id: 2,
                    name: "Brunswick".to_string(),
                    households: vec![],
                },
            ],
        }
    }

    fn suburbs_fixture() -> Vec<Suburb> {
        ["Richmond", "Brunswick", "Parkville", "Fitzroy"]
            .iter()
            .enumerate()
            .map(|(i, name)| Suburb {
                id: i as u64 + 1,
                name: (*name).to_string(),
            })
            .collect()
    }

    fn users_fixture() -> Vec<User> {
        vec![
            User {
                id: 1,
                name: "Ava Nguyen".to_string(),
                email: "ava.nguyen@example.com".to_string(),
            },
            User {
                id: 2,
                name: "Tom Papadopoulos".to_string(),
                email: "tom.p@example.com".to_string(),
            },
            User {
                id: 3,
                name: "Mei Chen".to_string(),
                email: "mei.chen@example.com".to_string(),
            },
        ]
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn spending(&self, _query: &SpendingQuery) -> Result<SpendingData, CoreError> {
        self.simulate_latency().await;
        Ok(Self::spending_fixture())
    }

    async fn profit_margin(
        &self,
        _query: &ProfitMarginQuery,
    ) -> Result<ProfitMarginData, CoreError> {
        self.simulate_latency().await;
        Ok(Self::profit_margin_fixture())
    }

    async fn reports(&self) -> Result<Vec<Report>, CoreError> {
        self.simulate_latency().await;
        Ok(Self::reports_fixture())
    }

    async fn outages(&self) -> Result<OutageSummary, CoreError> {
        self.simulate_latency().await;
        Ok(Self::outages_fixture())
    }

    async fn suburbs(&self) -> Result<Vec<Suburb>, CoreError> {
        self.simulate_latency().await;
        Ok(Self::suburbs_fixture())
    }

    async fn users(&self) -> Result<Vec<User>, CoreError> {
        self.simulate_latency().await;
        Ok(Self::users_fixture())
    }

    fn watch_spending(&self, _query: &SpendingQuery) -> DataWatch<SpendingData> {
        DataWatch::fixed(&Self::spending_fixture())
    }

    fn watch_profit_margin(&self, _query: &ProfitMarginQuery) -> DataWatch<ProfitMarginData> {
        DataWatch::fixed(&Self::profit_margin_fixture())
    }
}
