//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Result, UcareError};

pub const DEFAULT_API_BASE: &str = "https://api.uploadcare.com/";
pub const DEFAULT_CDN_BASE: &str = "https://ucarecdn.com/";
pub const DEFAULT_API_VERSION: &str = "0.2";

pub const ENV_PUBLIC_KEY: &str = "UCARE_PUBLIC_KEY";
pub const ENV_SECRET_KEY: &str = "UCARE_SECRET_KEY";
pub const ENV_API_BASE: &str = "UCARE_API_BASE";
pub const ENV_CDN_BASE: &str = "UCARE_CDN_BASE";
pub const ENV_API_VERSION: &str = "UCARE_API_VERSION";

/// Connection settings for [`crate::Ucare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UcareConfig {
    pub public_key: String,
    pub secret_key: String,
    /// Base URL of the REST API (paths like `/files/<uuid>/` are joined onto it)
    pub api_base: Url,
    /// Prefix for CDN URLs, always ends with `/`
    pub cdn_base: String,
    /// Value substituted into the versioned `Accept` header
    pub api_version: String,
    /// Request timeout for API calls (default: 30s)
    pub timeout: Duration,
}

impl UcareConfig {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read the configuration from `UCARE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let public_key = lookup(ENV_PUBLIC_KEY).ok_or(UcareError::MissingConfig(ENV_PUBLIC_KEY))?;
        let secret_key = lookup(ENV_SECRET_KEY).ok_or(UcareError::MissingConfig(ENV_SECRET_KEY))?;

        let mut config = Self::new(public_key, secret_key);
        if let Some(api_base) = lookup(ENV_API_BASE) {
            config = config.with_api_base(&api_base)?;
        }
        if let Some(cdn_base) = lookup(ENV_CDN_BASE) {
            config = config.with_cdn_base(cdn_base);
        }
        if let Some(api_version) = lookup(ENV_API_VERSION) {
            config.api_version = api_version;
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: &str) -> Result<Self> {
        self.api_base = Url::parse(api_base)?;
        Ok(self)
    }

    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        let mut cdn_base = cdn_base.into();
        if !cdn_base.ends_with('/') {
            cdn_base.push('/');
        }
        self.cdn_base = cdn_base;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = UcareConfig::new("pub", "secret");
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(config.cdn_base, DEFAULT_CDN_BASE);
        assert_eq!(config.api_version, "0.2");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_lookup_requires_keys() {
        let err = UcareConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, UcareError::MissingConfig(ENV_PUBLIC_KEY)));

        let err = UcareConfig::from_lookup(lookup_from(&[(ENV_PUBLIC_KEY, "pub")])).unwrap_err();
        assert!(matches!(err, UcareError::MissingConfig(ENV_SECRET_KEY)));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = UcareConfig::from_lookup(lookup_from(&[
            (ENV_PUBLIC_KEY, "pub"),
            (ENV_SECRET_KEY, "secret"),
            (ENV_API_BASE, "http://localhost:8000/"),
            (ENV_CDN_BASE, "http://localhost:8001"),
            (ENV_API_VERSION, "0.5"),
        ]))
        .unwrap();

        assert_eq!(config.public_key, "pub");
        assert_eq!(config.secret_key, "secret");
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.cdn_base, "http://localhost:8001/");
        assert_eq!(config.api_version, "0.5");
    }

    #[test]
    fn test_invalid_api_base() {
        let err = UcareConfig::from_lookup(lookup_from(&[
            (ENV_PUBLIC_KEY, "pub"),
            (ENV_SECRET_KEY, "secret"),
            (ENV_API_BASE, "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, UcareError::Url(_)));
    }
}
