//! Read-only API manager configuration.
//!
//! ```yaml
//! store_url: https://localhost:9443/store
//! request_timeout_secs: 30
//! gateway_environments:
//!   - name: Production and Sandbox
//!     type: hybrid
//!     api_gateway_endpoint: http://localhost:8280,https://localhost:8243
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use std::{env, fs};

use crate::error::{Result, StoreApiError};
use crate::model::GatewayEnvironment;

/// Overrides `store_url` from the config file when set.
pub const STORE_URL_ENV: &str = "STORE_API_URL";

pub trait ApiManagerConfig {
    fn store_url(&self) -> &str;

    /// Gateway environments in their configured order.
    fn gateway_environments(&self) -> &[GatewayEnvironment];

    fn request_timeout(&self) -> Option<Duration> {
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub store_url: String,
    #[serde(default)]
    pub gateway_environments: Vec<GatewayEnvironment>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| StoreApiError::Config {
            path: path.display().to_string(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
        let mut config: StoreConfig =
            serde_yaml::from_str(&raw).map_err(|err| invalid(err.to_string()))?;

        config.apply_store_url_override(env::var(STORE_URL_ENV).ok());
        if config.store_url.trim().is_empty() {
            return Err(invalid("store_url must not be empty".to_string()));
        }
        Ok(config)
    }

    fn apply_store_url_override(&mut self, store_url: Option<String>) {
        if let Some(url) = store_url {
            self.store_url = url;
        }
    }
}

impl ApiManagerConfig for StoreConfig {
    fn store_url(&self) -> &str {
        &self.store_url
    }

    fn gateway_environments(&self) -> &[GatewayEnvironment] {
        &self.gateway_environments
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(raw: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(raw.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_environments_in_order() {
        let file = write_config(
            r"
store_url: https://localhost:9443/store
request_timeout_secs: 15
gateway_environments:
  - name: Production
    type: production
    api_gateway_endpoint: http://p:8280,https://p:8243
  - name: Sandbox
    type: sandbox
    api_gateway_endpoint: http://s:8280,https://s:8243
",
        );

        let config = StoreConfig::load(file.path()).expect("config");
        let names: Vec<&str> = config
            .gateway_environments()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Production", "Sandbox"]);
        assert_eq!(config.gateway_environments()[1].env_type, "sandbox");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn environments_default_to_empty() {
        let file = write_config("store_url: http://h/store\n");
        let config = StoreConfig::load(file.path()).expect("config");
        assert!(config.gateway_environments().is_empty());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let file = write_config("gateway_environments: [\n");
        let err = StoreConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreApiError::Config { .. }));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = StoreConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err,
            StoreApiError::Config { ref path, .. } if path.ends_with("absent.yaml")
        ));
    }

    #[test]
    fn store_url_override_replaces_file_value() {
        let file = write_config("store_url: http://file/store\n");
        let mut config = StoreConfig::load(file.path()).expect("config");

        config.apply_store_url_override(Some("https://override:9443/store".to_string()));
        assert_eq!(config.store_url(), "https://override:9443/store");

        config.apply_store_url_override(None);
        assert_eq!(config.store_url(), "https://override:9443/store");
    }

    #[test]
    fn blank_store_url_is_rejected() {
        let file = write_config("store_url: \"   \"\n");
        let err = StoreConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            StoreApiError::Config { ref reason, .. } if reason == "store_url must not be empty"
        ));
    }
}
