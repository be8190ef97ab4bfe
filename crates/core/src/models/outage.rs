use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outage state of one suburb, with the affected households attached.
///
/// Household records are free-form objects upstream; they are carried
/// through uninspected for the map layer to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuburbOutage {
    pub id: u64,
    pub name: String,
    pub households: Vec<Value>,
}

/// Outage roll-up across all suburbs, as displayed on the operator map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageSummary {
    pub suburbs: Vec<SuburbOutage>,
}
