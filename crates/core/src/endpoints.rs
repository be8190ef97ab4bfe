//! URL builders, one per dashboard data kind.
//!
//! Pure string assembly: the base origin comes from configuration, dates
//! render as ISO 8601, and optional parameters are omitted entirely when
//! absent. Nothing here validates values; a malformed ID is passed through
//! and comes back as a downstream HTTP error.

use crate::models::profit::ProfitMarginQuery;
use crate::models::spending::SpendingQuery;

pub fn spending_url(base: &str, query: &SpendingQuery) -> String {
    let mut url = format!("{base}/consumer/spending?start_date={}", query.start_date);
    if let Some(end_date) = query.end_date {
        url.push_str(&format!("&end_date={end_date}"));
    }
    if let Some(consumer_id) = &query.consumer_id {
        url.push_str(&format!("&consumer_id={consumer_id}"));
    }
    url
}

pub fn profit_margin_url(base: &str, query: &ProfitMarginQuery) -> String {
    let mut url = format!(
        "{base}/retailer/profitMargin?start_date={}",
        query.start_date
    );
    if let Some(end_date) = query.end_date {
        url.push_str(&format!("&end_date={end_date}"));
    }
    url
}

pub fn reports_url(base: &str) -> String {
    format!("{base}/consumer/reports")
}

pub fn outages_url(base: &str) -> String {
    format!("{base}/energy/outages")
}

pub fn suburbs_url(base: &str) -> String {
    format!("{base}/energy/suburbs")
}

pub fn users_url(base: &str) -> String {
    format!("{base}/energy/users")
}
