//! Server configuration, read from environment variables at start-up.
//!
//! | Variable                 | Default                         |
//! |--------------------------|---------------------------------|
//! | `CERTIFY_HOST`           | `127.0.0.1`                     |
//! | `CERTIFY_PORT`           | `8080`                          |
//! | `CERTIFY_SHEET_URL`      | published certificate sheet     |
//! | `CERTIFY_PUBLIC_ORIGIN`  | `http://{host}:{port}`          |
//! | `CERTIFY_CACHE_TTL_SECS` | `300`                           |

use crate::certificate_cache::state::DEFAULT_FRESHNESS_WINDOW;
use crate::services::certificates::source::DEFAULT_SHEET_URL;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const HOST_VAR: &str = "CERTIFY_HOST";
pub const PORT_VAR: &str = "CERTIFY_PORT";
pub const SHEET_URL_VAR: &str = "CERTIFY_SHEET_URL";
pub const PUBLIC_ORIGIN_VAR: &str = "CERTIFY_PUBLIC_ORIGIN";
pub const CACHE_TTL_VAR: &str = "CERTIFY_CACHE_TTL_SECS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CSV export of the certificate sheet.
    pub sheet_url: Url,
    /// Origin permalinks point at.
    pub public_origin: Url,
    /// How long a fetched sheet is served from cache.
    pub cache_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from any variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_VAR) {
            Some(value) => parse_number(PORT_VAR, value)?,
            None => DEFAULT_PORT,
        };
        let sheet_url = parse_http_url(
            SHEET_URL_VAR,
            get(SHEET_URL_VAR).unwrap_or_else(|| DEFAULT_SHEET_URL.to_string()),
        )?;
        let public_origin = parse_http_url(
            PUBLIC_ORIGIN_VAR,
            get(PUBLIC_ORIGIN_VAR).unwrap_or_else(|| format!("http://{}:{}", host, port)),
        )?;
        let cache_ttl = match get(CACHE_TTL_VAR) {
            Some(value) => Duration::from_secs(parse_number(CACHE_TTL_VAR, value)?),
            None => DEFAULT_FRESHNESS_WINDOW,
        };

        Ok(Self {
            host,
            port,
            sheet_url,
            public_origin,
            cache_ttl,
        })
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

fn parse_http_url(var: &'static str, value: String) -> Result<Url, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
        _ => Err(ConfigError::InvalidUrl { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.sheet_url.as_str(), DEFAULT_SHEET_URL);
        assert_eq!(config.public_origin.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.bind_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, "9000"),
            (SHEET_URL_VAR, "https://sheets.example.com/export?format=csv"),
            (PUBLIC_ORIGIN_VAR, "https://certs.example.org"),
            (CACHE_TTL_VAR, "30"),
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.sheet_url.as_str(),
            "https://sheets.example.com/export?format=csv"
        );
        assert_eq!(config.public_origin.as_str(), "https://certs.example.org/");
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[(PORT_VAR, "  "), (CACHE_TTL_VAR, "")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        assert_eq!(
            config(&[(PORT_VAR, "eighty")]),
            Err(ConfigError::InvalidNumber {
                var: PORT_VAR,
                value: "eighty".to_string()
            })
        );
        assert!(matches!(
            config(&[(CACHE_TTL_VAR, "-1")]),
            Err(ConfigError::InvalidNumber { var: CACHE_TTL_VAR, .. })
        ));
    }

    #[test]
    fn urls_must_be_http() {
        assert!(matches!(
            config(&[(SHEET_URL_VAR, "file:///tmp/certs.csv")]),
            Err(ConfigError::InvalidUrl { var: SHEET_URL_VAR, .. })
        ));
        assert!(matches!(
            config(&[(PUBLIC_ORIGIN_VAR, "not a url")]),
            Err(ConfigError::InvalidUrl { var: PUBLIC_ORIGIN_VAR, .. })
        ));
    }
}
