//! Configuration management for the pixiv client.
//!
//! Handles loading, saving, and validating configuration from
//! platform-specific config directories.

use crate::error::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application name used for config directory.
const APP_NAME: &str = "pixiv";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Placeholder value for unconfigured credentials.
const CREDENTIAL_PLACEHOLDER: &str = "YOUR_PIXIV_ID_HERE";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.153 Safari/537.36";

/// Site root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.pixiv.net/";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Login credentials.
    pub account: AccountConfig,

    /// HTTP client settings.
    pub client: ClientConfig,
}

/// Account credentials for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// pixiv ID or e-mail address.
    pub pixiv_id: String,

    /// Account password.
    pub password: String,

    /// Netscape cookie file exported from a logged-in browser.
    /// Used instead of a password login when no credentials are set.
    pub cookie_file: Option<PathBuf>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            pixiv_id: CREDENTIAL_PLACEHOLDER.to_string(),
            password: String::new(),
            cookie_file: None,
        }
    }
}

impl AccountConfig {
    /// Checks if credentials are configured (not placeholder).
    pub fn has_credentials(&self) -> bool {
        !self.pixiv_id.is_empty()
            && self.pixiv_id != CREDENTIAL_PLACEHOLDER
            && !self.password.is_empty()
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Site root; every endpoint is resolved against it.
    pub base_url: String,

    /// User-Agent header value.
    pub user_agent: String,

    /// Additional headers sent with every request.
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds.
    pub timeout_sec: u64,

    /// Delay before each web request in seconds.
    pub delay_between_requests_sec: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            timeout_sec: 30,
            delay_between_requests_sec: 1.0,
        }
    }
}

impl ClientConfig {
    /// Builds the default header map: `DNT` plus the configured extras.
    ///
    /// The user agent is applied separately by the client builder.
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert("dnt", HeaderValue::from_static("1"));

        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidValue {
                    key: format!("client.headers.{}", name),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidValue {
                    key: format!("client.headers.{}", name),
                    message: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Validates the client settings without touching the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "client.base_url".to_string(),
            message: e.to_string(),
        })?;

        if self.user_agent.is_empty() {
            return Err(ConfigError::MissingValue("client.user_agent".to_string()));
        }
        HeaderValue::from_str(&self.user_agent).map_err(|e| ConfigError::InvalidValue {
            key: "client.user_agent".to_string(),
            message: e.to_string(),
        })?;

        if !self.delay_between_requests_sec.is_finite() || self.delay_between_requests_sec < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "client.delay_between_requests_sec".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        self.header_map().map(|_| ())
    }
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Either a password login or a cookie file must be available.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.account.has_credentials() && self.account.cookie_file.is_none() {
            return Err(ConfigError::MissingValue(
                "account.pixiv_id and account.password (or account.cookie_file)".to_string(),
            ));
        }

        self.client.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.account.has_credentials());
        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client.user_agent, DEFAULT_USER_AGENT);
        assert!(config.client.headers.is_empty());
        assert_eq!(config.client.timeout_sec, 30);
    }

    #[test]
    fn test_defaults_are_not_shared() {
        let mut first = ClientConfig::default();
        first
            .headers
            .insert("X-Extra".to_string(), "1".to_string());

        let second = ClientConfig::default();
        assert!(second.headers.is_empty());
    }

    #[test]
    fn test_credentials_check() {
        let mut account = AccountConfig::default();
        assert!(!account.has_credentials());

        account.pixiv_id = "alice".to_string();
        assert!(!account.has_credentials());

        account.password = "hunter2".to_string();
        assert!(account.has_credentials());
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config
            .client
            .headers
            .insert("Accept-Language".to_string(), "ja".to_string());
        let file = NamedTempFile::new().unwrap();

        config.save_to(file.path()).unwrap();

        let loaded = Config::load_from(file.path()).unwrap();
        assert_eq!(loaded.client.user_agent, config.client.user_agent);
        assert_eq!(loaded.client.headers.get("Accept-Language").unwrap(), "ja");
    }

    #[test]
    fn test_headers_must_be_a_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nheaders = \"X-Extra: 1\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_header_name() {
        let mut client = ClientConfig::default();
        client
            .headers
            .insert("bad header".to_string(), "1".to_string());

        let err = client.header_map().unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "client.headers.bad header"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_map_includes_dnt() {
        let headers = ClientConfig::default().header_map().unwrap();
        assert_eq!(headers.get("dnt").unwrap(), "1");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.account.pixiv_id = "alice".to_string();
        config.account.password = "hunter2".to_string();
        assert!(config.validate().is_ok());

        config.client.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cookie_file_is_enough() {
        let mut config = Config::default();
        config.account.cookie_file = Some(PathBuf::from("pixiv-cookies.txt"));
        assert!(config.validate().is_ok());
    }
}
