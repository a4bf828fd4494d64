//! Module

use super::errors::{Result, SDKError};
use super::types::Credentials;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default service root
pub const DEFAULT_BASE_URL: &str = "https://v2.whitehaze.ru/api/";

/// Prefix of the environment variables read by [`ClientConfig::apply_env_overrides`]
pub const ENV_PREFIX: &str = "DIRECTORY_";

/// Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root every endpoint is resolved against
    pub base_url: String,
    /// Bot that sends broadcast messages
    #[serde(alias = "botId")]
    pub bot_id: String,
    /// Interface language sent on login
    #[serde(alias = "bolangtId")]
    pub lang: String,
    /// Account login
    pub login: String,
    /// Account password
    pub password: String,
    /// Recipient of the pre-flight test message, if any
    #[serde(alias = "testRecipient")]
    pub test_recipient: Option<String>,
    /// Settings
    pub settings: ClientSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bot_id: String::new(),
            lang: "ru".to_string(),
            login: String::new(),
            password: String::new(),
            test_recipient: None,
            settings: ClientSettings::default(),
        }
    }
}

/// Settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// HTTP request timeout in seconds
    pub timeout: u64,
    /// Workers for the detail-fetch batch
    pub workers: usize,
    /// Workers for the broadcast batch
    pub send_workers: usize,
    /// Pause each worker takes after a call, in milliseconds
    pub pacing_ms: u64,
    /// Deadline for one batch item, in seconds
    pub call_timeout: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: 30,
            workers: 300,
            send_workers: 10,
            pacing_ms: 100,
            call_timeout: 30,
        }
    }
}

impl ClientSettings {
    /// Pacing interval as a [`Duration`]
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Per-item deadline as a [`Duration`]
    pub fn call_deadline(&self) -> Duration {
        Duration::from_secs(self.call_timeout)
    }
}

/// Configuration
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Service root
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    /// Login, password and language
    pub fn credentials(mut self, login: &str, password: &str, lang: &str) -> Self {
        self.config.login = login.to_string();
        self.config.password = password.to_string();
        self.config.lang = lang.to_string();
        self
    }

    /// Sending bot
    pub fn bot_id(mut self, bot_id: &str) -> Self {
        self.config.bot_id = bot_id.to_string();
        self
    }

    /// Pre-flight recipient
    pub fn test_recipient(mut self, recipient: &str) -> Self {
        self.config.test_recipient = Some(recipient.to_string());
        self
    }

    /// Settings
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.settings.timeout = timeout;
        self
    }

    /// Settings
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.settings.workers = workers;
        self
    }

    /// Settings
    pub fn send_workers(mut self, workers: usize) -> Self {
        self.config.settings.send_workers = workers;
        self
    }

    /// Settings
    pub fn pacing_ms(mut self, pacing_ms: u64) -> Self {
        self.config.settings.pacing_ms = pacing_ms;
        self
    }

    /// Per-item deadline in seconds
    pub fn call_timeout(mut self, call_timeout: u64) -> Self {
        self.config.settings.call_timeout = call_timeout;
        self
    }

    /// Configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration
impl ClientConfig {
    /// Configuration
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON or YAML file; JSON parses as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SDKError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            SDKError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Overlays `DIRECTORY_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlays values from an arbitrary lookup keyed by full variable name
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("LOGIN") {
            self.login = v;
        }
        if let Some(v) = var("PASSWORD") {
            self.password = v;
        }
        if let Some(v) = var("LANG") {
            self.lang = v;
        }
        if let Some(v) = var("BOT_ID") {
            self.bot_id = v;
        }
        if let Some(v) = var("TEST_RECIPIENT") {
            self.test_recipient = Some(v).filter(|r| !r.is_empty());
        }
        if let Some(v) = var("TIMEOUT") {
            self.settings.timeout = v
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(v) = var("WORKERS") {
            self.settings.workers = v
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid workers count: {}", e)))?;
        }
        if let Some(v) = var("SEND_WORKERS") {
            self.settings.send_workers = v
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid send workers count: {}", e)))?;
        }
        if let Some(v) = var("PACING_MS") {
            self.settings.pacing_ms = v
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid pacing: {}", e)))?;
        }
        if let Some(v) = var("CALL_TIMEOUT") {
            self.settings.call_timeout = v
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid call timeout: {}", e)))?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }

    /// Rejects configurations the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.login.is_empty() || self.password.is_empty() {
            return Err(SDKError::ConfigError(
                "login and password are required".to_string(),
            ));
        }
        if self.bot_id.is_empty() {
            return Err(SDKError::ConfigError("bot id is required".to_string()));
        }
        if self.settings.workers == 0 || self.settings.send_workers == 0 {
            return Err(SDKError::ConfigError(
                "worker counts must be positive".to_string(),
            ));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| SDKError::ConfigError(format!("Invalid base url: {}", e)))?;
        Ok(())
    }

    /// Login payload for the auth endpoint
    pub fn credentials(&self) -> Credentials {
        Credentials {
            lang: self.lang.clone(),
            login: self.login.clone(),
            password: self.password.clone(),
        }
    }
}
