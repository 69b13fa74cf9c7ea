use reqwest::Url;
use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/data";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: Url,
    pub api_timeout: Duration,
}

#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

impl Config {
    /// Reads `PORT`, `RAINFALL_API_URL` and `RAINFALL_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError(format!("PORT={value:?}")))?,
            None => DEFAULT_PORT,
        };

        let api_url = lookup("RAINFALL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url =
            Url::parse(&api_url).map_err(|err| ConfigError(format!("RAINFALL_API_URL: {err}")))?;

        let timeout_secs = match lookup("RAINFALL_API_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError(format!("RAINFALL_API_TIMEOUT_SECS={value:?}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:5000/data");
        assert_eq!(config.api_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("RAINFALL_API_URL", "http://backend:5000/api/data"),
            ("RAINFALL_API_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_url.path(), "/api/data");
        assert_eq!(config.api_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("RAINFALL_API_URL", "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[("RAINFALL_API_TIMEOUT_SECS", "0")])).is_err());
    }
}
