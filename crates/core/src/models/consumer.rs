use serde::{Deserialize, Serialize};
use std::fmt;

/// Consumer identifier as it appears in upstream payloads.
///
/// The backend serializes this field as a JSON number on some routes and as
/// a string on others; untagged deserialization accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsumerId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerId::Number(n) => write!(f, "{n}"),
            ConsumerId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for ConsumerId {
    fn from(id: u64) -> Self {
        ConsumerId::Number(id)
    }
}

impl From<&str> for ConsumerId {
    fn from(id: &str) -> Self {
        ConsumerId::Text(id.to_string())
    }
}
