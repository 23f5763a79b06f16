use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const BACKEND_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: Url,
    pub backend_token: Option<String>,
    pub backend_timeout: Duration,
    pub allowed_origin: Option<String>,
    pub environment: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => write!(f, "{} has invalid value '{}'", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| HOST.to_string());

        let port = match non_empty("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => PORT,
        };

        let raw_url = non_empty("BACKEND_API_URL").ok_or(ConfigError::Missing("BACKEND_API_URL"))?;
        let backend_url = Url::parse(&raw_url).map_err(|_| ConfigError::Invalid {
            name: "BACKEND_API_URL",
            value: raw_url.clone(),
        })?;

        let backend_timeout = match non_empty("BACKEND_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "BACKEND_TIMEOUT_SECS",
                    value,
                })?,
            None => Duration::from_secs(BACKEND_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            backend_url,
            backend_token: non_empty("BACKEND_API_TOKEN"),
            backend_timeout,
            allowed_origin: non_empty("ALLOWED_ORIGIN"),
            environment: non_empty("RUST_ENV").unwrap_or_else(|| "development".to_string()),
        })
    }
}

/// State handed to every handler. Replaces ambient globals: everything a
/// request needs is reachable from here.
pub struct AppContext<B> {
    pub backend: B,
    pub environment: String,
}

impl<B> AppContext<B> {
    pub fn new(backend: B, environment: impl Into<String>) -> Self {
        Self {
            backend,
            environment: environment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup(&[("BACKEND_API_URL", "http://localhost:9000/api")]))
                .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
        assert_eq!(config.backend_token, None);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_backend_url_is_required() {
        let result = AppConfig::from_lookup(lookup(&[("PORT", "9090")]));
        assert!(matches!(result, Err(ConfigError::Missing("BACKEND_API_URL"))));
    }

    #[test]
    fn test_invalid_values() {
        let bad_port = AppConfig::from_lookup(lookup(&[
            ("BACKEND_API_URL", "http://localhost:9000"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(bad_port, Err(ConfigError::Invalid { name: "PORT", .. })));

        let bad_timeout = AppConfig::from_lookup(lookup(&[
            ("BACKEND_API_URL", "http://localhost:9000"),
            ("BACKEND_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(
            bad_timeout,
            Err(ConfigError::Invalid { name: "BACKEND_TIMEOUT_SECS", .. })
        ));
    }
}
