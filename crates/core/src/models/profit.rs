use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::PricePoint;

/// The three series behind the retailer's profit-margin chart.
///
/// The frontend overlays them; profits are what the backend says they are,
/// not recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitSeries {
    pub selling_prices: Vec<PricePoint>,
    pub spot_prices: Vec<PricePoint>,
    pub profits: Vec<PricePoint>,
}

/// Profit-margin data for the retailer dashboard over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitMarginData {
    pub start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub values: ProfitSeries,
}

/// Parameters for a profit-margin lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitMarginQuery {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl ProfitMarginQuery {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}
