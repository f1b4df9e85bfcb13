use std::{env, path::PathBuf, sync::Arc, time::Duration};

use common::error::{PortalError, PortalResult};

use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Environment variable holding the API base url
pub const API_URL_VAR: &str = "PORTAL_API_URL";
/// Environment variable holding the request timeout in whole seconds
pub const REQUEST_TIMEOUT_VAR: &str = "PORTAL_REQUEST_TIMEOUT_SECS";
/// Environment variable pointing at the JSON file used as persisted storage
pub const STORAGE_PATH_VAR: &str = "PORTAL_STORAGE_PATH";
/// Environment variable pointing at a log4rs YAML config
pub const LOG_CONFIG_VAR: &str = "PORTAL_LOG_CONFIG";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings of the portal client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base url every request path is appended to. Never ends with a slash.
    pub api_url: String,
    pub request_timeout: Duration,
    /// File backing the persisted storage. In-memory storage is used when absent.
    pub storage_path: Option<PathBuf>,
    pub log_config: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_path: None,
            log_config: None,
        }
    }
}

impl ClientConfig {
    /// Read the config from the process environment. Unset variables fall back to defaults.
    /// # Errors
    /// This function will return an error if a variable is set to an invalid value
    pub fn from_env() -> PortalResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source
    /// # Errors
    /// This function will return an error if a variable is set to an invalid value
    pub fn from_lookup<F>(lookup: F) -> PortalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(PortalError::InvalidConfig {
                    key: API_URL_VAR,
                    value: url.to_owned(),
                });
            }
            config.api_url = url.to_owned();
        }
        if let Some(timeout) = lookup(REQUEST_TIMEOUT_VAR) {
            let seconds = timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or(PortalError::InvalidConfig {
                    key: REQUEST_TIMEOUT_VAR,
                    value: timeout.clone(),
                })?;
            config.request_timeout = Duration::from_secs(seconds);
        }
        config.storage_path = lookup(STORAGE_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        config.log_config = lookup(LOG_CONFIG_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    /// Open the storage backend selected by [ClientConfig::storage_path]
    /// # Errors
    /// This function will return an error if the storage file exists but cannot be read
    pub fn open_storage(&self) -> PortalResult<Arc<dyn Storage>> {
        Ok(match &self.storage_path {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => Arc::new(MemoryStorage::new()),
        })
    }
}

#[cfg(test)]
mod test {
    use std::{collections::HashMap, path::PathBuf, time::Duration};

    use common::error::PortalError;
    use rstest::rstest;

    use super::{ClientConfig, API_URL_VAR, REQUEST_TIMEOUT_VAR, STORAGE_PATH_VAR};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_should_default_when_unset() -> Result<(), PortalError> {
        let config = ClientConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config, ClientConfig::default());
        Ok(())
    }

    #[test]
    fn from_lookup_should_apply_overrides() -> Result<(), PortalError> {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com/"),
            (REQUEST_TIMEOUT_VAR, "5"),
            (STORAGE_PATH_VAR, "/tmp/portal.json"),
        ]))?;

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/portal.json")));
        assert_eq!(config.log_config, None);
        Ok(())
    }

    #[rstest]
    #[case(API_URL_VAR, "localhost:5000")]
    #[case(REQUEST_TIMEOUT_VAR, "soon")]
    #[case(REQUEST_TIMEOUT_VAR, "0")]
    fn from_lookup_should_reject_invalid_values(#[case] key: &str, #[case] value: &str) {
        let result = ClientConfig::from_lookup(lookup(&[(key, value)]));
        assert!(matches!(result, Err(PortalError::InvalidConfig { .. })));
    }
}
