use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::consumer::ConsumerId;
use super::price::PricePoint;

/// Spending history for one consumer over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingData {
    pub start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<ConsumerId>,

    pub spending: Vec<PricePoint>,
}

/// Parameters for a spending lookup.
///
/// `None` fields are left out of the request entirely, never sent empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingQuery {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub consumer_id: Option<ConsumerId>,
}

impl SpendingQuery {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            consumer_id: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_consumer_id(mut self, id: impl Into<ConsumerId>) -> Self {
        self.consumer_id = Some(id.into());
        self
    }
}
