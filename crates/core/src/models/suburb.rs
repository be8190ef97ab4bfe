use serde::{Deserialize, Serialize};

/// A suburb known to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suburb {
    pub id: u64,
    pub name: String,
}
