//! services/engine/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Basic-auth credentials for a backend API.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The optional WooCommerce store that supplies the product inventory.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub url: String,
    pub credentials: Credentials,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub wordpress_api_url: String,
    pub wordpress_credentials: Option<Credentials>,
    pub store: Option<StoreConfig>,
    pub site_domain: Option<String>,
    pub cycle_interval: Duration,
    pub cycle_error_delay: Duration,
    pub gate_max_retries: u32,
    pub acceptance_threshold: f64,
    pub auto_publish: bool,
    pub publish_status: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Database Settings ---
        let bind_address: SocketAddr =
            parse_or(&lookup, "BIND_ADDRESS", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let database_url = required(&lookup, "DATABASE_URL")?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Content Backend ---
        let wordpress_api_url = required(&lookup, "WORDPRESS_API_URL")?
            .trim_end_matches('/')
            .to_string();
        let wordpress_credentials = credentials(&lookup, "WORDPRESS_USERNAME", "WORDPRESS_APP_PASSWORD")?;

        let store = match lookup("WOOCOMMERCE_URL") {
            Some(url) => {
                let credentials = credentials(&lookup, "WOOCOMMERCE_KEY", "WOOCOMMERCE_SECRET")?
                    .ok_or_else(|| ConfigError::MissingVar("WOOCOMMERCE_KEY".to_string()))?;
                Some(StoreConfig {
                    url: url.trim_end_matches('/').to_string(),
                    credentials,
                })
            }
            None => None,
        };

        let site_domain = lookup("SITE_DOMAIN").filter(|d| !d.trim().is_empty());

        // --- Improvement Cycle ---
        let cycle_interval = Duration::from_secs(parse_or(&lookup, "CYCLE_INTERVAL_SECS", 30)?);
        let cycle_error_delay = Duration::from_secs(parse_or(&lookup, "CYCLE_ERROR_DELAY_SECS", 10)?);
        let gate_max_retries = parse_or(&lookup, "GATE_MAX_RETRIES", 3)?;

        let acceptance_threshold: f64 = parse_or(&lookup, "ACCEPTANCE_THRESHOLD", 0.8)?;
        if !(0.0..=1.0).contains(&acceptance_threshold) {
            return Err(ConfigError::InvalidValue(
                "ACCEPTANCE_THRESHOLD".to_string(),
                format!("{} is outside [0, 1]", acceptance_threshold),
            ));
        }

        let auto_publish = parse_or(&lookup, "AUTO_PUBLISH", false)?;
        let publish_status = lookup("PUBLISH_STATUS").unwrap_or_else(|| "draft".to_string());
        if !matches!(publish_status.as_str(), "draft" | "pending" | "publish" | "private") {
            return Err(ConfigError::InvalidValue(
                "PUBLISH_STATUS".to_string(),
                format!("'{}' is not a WordPress post status", publish_status),
            ));
        }

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            wordpress_api_url,
            wordpress_credentials,
            store,
            site_domain,
            cycle_interval,
            cycle_error_delay,
            gate_max_retries,
            acceptance_threshold,
            auto_publish,
            publish_status,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Both halves of a credential pair, or neither.
fn credentials<F>(lookup: &F, user_key: &str, secret_key: &str) -> Result<Option<Credentials>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match (lookup(user_key), lookup(secret_key)) {
        (Some(username), Some(password)) => Ok(Some(Credentials { username, password })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::MissingVar(secret_key.to_string())),
        (None, Some(_)) => Err(ConfigError::MissingVar(user_key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/engine"),
        ("WORDPRESS_API_URL", "https://example.se/wp-json/wp/v2/"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.wordpress_api_url, "https://example.se/wp-json/wp/v2");
        assert_eq!(config.cycle_interval, Duration::from_secs(30));
        assert_eq!(config.cycle_error_delay, Duration::from_secs(10));
        assert_eq!(config.gate_max_retries, 3);
        assert_eq!(config.acceptance_threshold, 0.8);
        assert!(!config.auto_publish);
        assert_eq!(config.publish_status, "draft");
        assert!(config.store.is_none());
        assert!(config.wordpress_credentials.is_none());
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = load(&[REQUIRED[1]]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(v) if v == "DATABASE_URL"));
    }

    #[test]
    fn half_a_credential_pair_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WORDPRESS_USERNAME", "editor"));
        let err = load(&pairs).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(v) if v == "WORDPRESS_APP_PASSWORD"));
    }

    #[test]
    fn threshold_outside_the_unit_interval_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ACCEPTANCE_THRESHOLD", "1.5"));
        assert!(matches!(load(&pairs), Err(ConfigError::InvalidValue(..))));
    }

    #[test]
    fn unparsable_numbers_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GATE_MAX_RETRIES", "three"));
        assert!(matches!(load(&pairs), Err(ConfigError::InvalidValue(v, _)) if v == "GATE_MAX_RETRIES"));
    }

    #[test]
    fn store_requires_its_keys() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WOOCOMMERCE_URL", "https://example.se"));
        assert!(load(&pairs).is_err());
        pairs.push(("WOOCOMMERCE_KEY", "ck"));
        pairs.push(("WOOCOMMERCE_SECRET", "cs"));
        assert_eq!(load(&pairs).unwrap().store.unwrap().url, "https://example.se");
    }
}
