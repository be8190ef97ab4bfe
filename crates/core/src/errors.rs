use thiserror::Error;

/// Unified error type for the entire gridview-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// `Clone` is derived so that a single in-flight fetch can hand its outcome
/// to every caller that coalesced onto it.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Network / HTTP ──────────────────────────────────────────────
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Subscriptions ───────────────────────────────────────────────
    #[error("Watch closed: {0}")]
    WatchClosed(String),
}

impl CoreError {
    /// The HTTP status code, when this is an HTTP-level failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Transport(redact_query(e.to_string()))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Parse(e.to_string())
    }
}

/// Strip query parameters from URLs embedded in error messages, so request
/// parameters never end up in logs verbatim.
fn redact_query(msg: String) -> String {
    if let Some(idx) = msg.find('?') {
        format!("{}?<query redacted>", &msg[..idx])
    } else {
        msg
    }
}
