use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::consumer::ConsumerId;

/// Who a generated report covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubject {
    pub suburb_id: u64,
    pub consumer_id: ConsumerId,
}

/// A generated billing report for one consumer in one suburb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Wire name is `for`, which is a keyword here.
    #[serde(rename = "for")]
    pub subject: ReportSubject,
}
