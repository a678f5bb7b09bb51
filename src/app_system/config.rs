use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_BUFFER: usize = 32;
const DEFAULT_NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid URL in {key}: {value} ({reason})")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("Invalid number in {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime settings for the storefront client.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub api_base: Url,
    pub request_timeout: Duration,
    pub store_buffer: usize,
    pub notice_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            store_buffer: DEFAULT_STORE_BUFFER,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

impl StorefrontConfig {
    /// Reads `STOREFRONT_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("STOREFRONT_API_BASE") {
            config.api_base = parse_base(&value)?;
        }
        if let Some(value) = lookup("STOREFRONT_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("STOREFRONT_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("STOREFRONT_STORE_BUFFER") {
            config.store_buffer = parse_number("STOREFRONT_STORE_BUFFER", &value)?;
        }
        if let Some(value) = lookup("STOREFRONT_NOTICE_CAPACITY") {
            config.notice_capacity = parse_number("STOREFRONT_NOTICE_CAPACITY", &value)?;
        }
        Ok(config)
    }
}

fn parse_base(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        key: "STOREFRONT_API_BASE",
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be used as a base".to_string()));
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr + PartialOrd + Default>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    match value.trim().parse::<T>() {
        // mpsc channels panic on a zero buffer
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_API_BASE", "https://shop.example/"),
            ("STOREFRONT_TIMEOUT_SECS", "5"),
            ("STOREFRONT_STORE_BUFFER", "8"),
        ]))
        .unwrap();

        assert_eq!(config.api_base.as_str(), "https://shop.example/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.notice_capacity, 16);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[("STOREFRONT_STORE_BUFFER", "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "STOREFRONT_STORE_BUFFER",
                value: "0".to_string()
            }
        );

        let err = StorefrontConfig::from_lookup(lookup_from(&[("STOREFRONT_API_BASE", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = StorefrontConfig::from_lookup(lookup_from(&[("STOREFRONT_API_BASE", "mailto:a@b.c")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
