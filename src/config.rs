//! Lookup configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! explicit overrides (CLI flags or their environment variables).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::DatashareError;

pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2019-11-01";
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Settings for talking to the Data Share management API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupConfig {
    pub endpoint: String,
    pub api_version: String,
    /// Subscription the client is scoped to. When unset, the share's own
    /// subscription is used.
    pub subscription_id: Option<String>,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    pub read_timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            subscription_id: None,
            token: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// On-disk form of [`LookupConfig`]. Every field is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub subscription_id: Option<String>,
    pub token: Option<String>,
    pub read_timeout_secs: Option<u64>,
}

/// Explicit overrides, typically from CLI flags.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub subscription_id: Option<String>,
    pub token: Option<String>,
    pub read_timeout_secs: Option<u64>,
}

impl LookupConfig {
    /// Load a config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, DatashareError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile =
            serde_yaml::from_str(&contents).map_err(|source| DatashareError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::default();
        config.apply_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration from an optional file and overrides.
    pub fn resolve(
        path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, DatashareError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(api_version) = file.api_version {
            self.api_version = api_version;
        }
        if file.subscription_id.is_some() {
            self.subscription_id = file.subscription_id;
        }
        if file.token.is_some() {
            self.token = file.token;
        }
        if let Some(secs) = file.read_timeout_secs {
            self.read_timeout = Duration::from_secs(secs);
        }
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if overrides.subscription_id.is_some() {
            self.subscription_id = overrides.subscription_id;
        }
        if overrides.token.is_some() {
            self.token = overrides.token;
        }
        if let Some(secs) = overrides.read_timeout_secs {
            self.read_timeout = Duration::from_secs(secs);
        }
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<(), DatashareError> {
        if self.read_timeout.is_zero() {
            return Err(DatashareError::Config(
                "read timeout must be greater than zero".to_string(),
            ));
        }
        if self.api_version.trim().is_empty() {
            return Err(DatashareError::Config("api version is empty".to_string()));
        }
        let endpoint = url::Url::parse(&self.endpoint).map_err(|source| {
            DatashareError::Config(format!("invalid endpoint '{}': {source}", self.endpoint))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(DatashareError::Config(format!(
                "invalid endpoint '{}': not a base URL",
                self.endpoint
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_five_minute_timeout() {
        let config = LookupConfig::default();
        assert_eq!(config.read_timeout, Duration::from_secs(300));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_version, "2019-11-01");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = LookupConfig::resolve(
            None,
            ConfigOverrides {
                endpoint: Some("http://localhost:8080".to_string()),
                subscription_id: Some("sub".to_string()),
                token: None,
                read_timeout_secs: Some(30),
            },
        )
        .expect("resolve");

        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.subscription_id.as_deref(), Some("sub"));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = LookupConfig::resolve(
            None,
            ConfigOverrides {
                read_timeout_secs: Some(0),
                ..Default::default()
            },
        )
        .expect_err("should fail");
        assert!(matches!(err, DatashareError::Config(_)));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let err = LookupConfig::resolve(
            None,
            ConfigOverrides {
                endpoint: Some("not a url".to_string()),
                ..Default::default()
            },
        )
        .expect_err("should fail");
        assert!(matches!(err, DatashareError::Config(_)));
    }

    #[test]
    fn non_base_endpoint_is_rejected() {
        let err = LookupConfig::resolve(
            None,
            ConfigOverrides {
                endpoint: Some("mailto:x".to_string()),
                ..Default::default()
            },
        )
        .expect_err("should fail");
        match err {
            DatashareError::Config(message) => assert!(message.contains("not a base URL")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
