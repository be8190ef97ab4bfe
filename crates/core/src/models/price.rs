use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated monetary value: one point on a spending or price chart.
///
/// Dates travel as ISO 8601 strings on the wire; `NaiveDate` serializes to
/// exactly that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub amount: f64,
}
