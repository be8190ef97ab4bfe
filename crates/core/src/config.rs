use std::time::Duration;

use crate::errors::CoreError;

/// Revalidation period used when `POLL_INTERVAL_MS` is not set.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Which [`DataSource`](crate::sources::traits::DataSource) implementation
/// the client runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The real backend over HTTP.
    Http,
    /// Fixed fixtures behind an artificial delay, for exercising the
    /// dashboards before the backend exists.
    Mock,
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API origin, without a trailing slash.
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub http_timeout_ms: u64,
    pub source: SourceKind,
    pub mock_delay_ms: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match lookup("DATA_SOURCE").map(|v| v.trim().to_lowercase()) {
            None => SourceKind::Http,
            Some(v) if v == "http" => SourceKind::Http,
            Some(v) if v == "mock" => SourceKind::Mock,
            Some(other) => {
                return Err(CoreError::Config(format!(
                    "DATA_SOURCE must be 'http' or 'mock', got '{other}'"
                )))
            }
        };

        let api_base_url = match lookup("API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
        {
            Some(url) => url,
            // The mock source never dials out, so the origin may be absent.
            None if source == SourceKind::Mock => String::new(),
            None => return Err(CoreError::Config("API_BASE_URL is required".to_string())),
        };

        Ok(Self {
            api_base_url,
            poll_interval_ms: parse_or_default(
                &lookup,
                "POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?,
            http_timeout_ms: parse_or_default(&lookup, "HTTP_TIMEOUT_MS", 30_000_u64)?,
            source,
            mock_delay_ms: parse_or_default(&lookup, "MOCK_DELAY_MS", 1_500_u64)?,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    T: std::str::FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| CoreError::Config(format!("{key} must be a valid number"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, SourceKind, DEFAULT_POLL_INTERVAL_MS};

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn requires_base_url_for_http_source() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }

    #[test]
    fn mock_source_works_without_base_url() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("DATA_SOURCE", "mock")])).unwrap();
        assert_eq!(config.source, SourceKind::Mock);
        assert_eq!(config.api_base_url, "");
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = ClientConfig::from_lookup(lookup_from(&[(
            "API_BASE_URL",
            "http://localhost:3001/",
        )]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3001");
    }

    #[test]
    fn defaults_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[(
            "API_BASE_URL",
            "http://localhost:3001",
        )]))
        .unwrap();
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.http_timeout_ms, 30_000);
        assert_eq!(config.source, SourceKind::Http);
        assert_eq!(config.mock_delay_ms, 1_500);
    }

    #[test]
    fn rejects_unknown_source_kind() {
        let err = ClientConfig::from_lookup(lookup_from(&[("DATA_SOURCE", "csv")]))
            .unwrap_err();
        assert!(err.to_string().contains("DATA_SOURCE"));
    }

    #[test]
    fn rejects_non_numeric_interval() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("API_BASE_URL", "http://localhost:3001"),
            ("POLL_INTERVAL_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("POLL_INTERVAL_MS"));
    }
}
