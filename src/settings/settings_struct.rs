use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoOptions;
use crate::models::SavedSubscription;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

pub fn default_listen_port() -> u16 {
    25500
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_fetch_timeout() -> u64 {
    crate::utils::http::DEFAULT_TIMEOUT
}

pub fn default_user_agent() -> String {
    "sub2clash".to_string()
}

pub fn default_provider_timeout() -> u64 {
    8
}

pub fn default_batch_size() -> usize {
    10
}

pub fn default_batch_pause() -> u64 {
    200
}

pub fn default_cors_relay() -> String {
    "https://api.allorigins.win/raw?url=".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_check_interval() -> u64 {
    60
}

pub fn default_refresh_interval_mins() -> u64 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    pub listen_address: String,
    pub listen_port: u16,
    pub log_level: String,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoSettings {
    pub provider_timeout_secs: u64,
    pub batch_size: usize,
    pub batch_pause_ms: u64,
    pub use_cors_relay: bool,
    pub cors_relay: String,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout(),
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause(),
            use_cors_relay: false,
            cors_relay: default_cors_relay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    pub enable: bool,
    pub check_interval_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            enable: default_true(),
            check_interval_secs: default_check_interval(),
        }
    }
}

/// A subscription declared in the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSettings {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub auto_refresh: bool,
    #[serde(default = "default_refresh_interval_mins")]
    pub refresh_interval_mins: u64,
}

impl From<&SubscriptionSettings> for SavedSubscription {
    fn from(entry: &SubscriptionSettings) -> Self {
        let name = if entry.name.is_empty() {
            entry.id.clone()
        } else {
            entry.name.clone()
        };
        let mut sub = SavedSubscription::new(entry.id.clone(), name, entry.url.clone());
        sub.auto_refresh = entry.auto_refresh;
        sub.refresh_interval_mins = entry.refresh_interval_mins;
        sub
    }
}

/// Settings structure to hold global configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub common: CommonSettings,
    pub fetch: FetchSettings,
    pub geo: GeoSettings,
    pub refresh: RefreshSettings,
    pub subscriptions: Vec<SubscriptionSettings>,
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current() -> Arc<Settings> {
        GLOBAL.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Parses a settings document.
    ///
    /// TOML is tried first; a document TOML rejects is read as YAML. When
    /// neither accepts it the TOML error is reported.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        let mut settings = match toml::from_str::<Settings>(content) {
            Ok(settings) => settings,
            Err(toml_err) => match serde_yaml::from_str::<Settings>(content) {
                Ok(settings) => settings,
                Err(_) => return Err(toml_err.into()),
            },
        };

        // Ensure listen_address is not empty
        if settings.common.listen_address.trim().is_empty() {
            settings.common.listen_address = default_listen_address();
        }
        if settings.geo.batch_size == 0 {
            settings.geo.batch_size = 1;
        }

        Ok(settings)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_content(&content)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }

    /// Resolver tuning derived from the `geo` section.
    pub fn geo_options(&self) -> GeoOptions {
        let options = GeoOptions::new()
            .with_timeout(Duration::from_secs(self.geo.provider_timeout_secs))
            .with_batch_size(self.geo.batch_size)
            .with_batch_pause(Duration::from_millis(self.geo.batch_pause_ms));

        if self.geo.use_cors_relay && !self.geo.cors_relay.is_empty() {
            options.with_cors_relay(self.geo.cors_relay.clone())
        } else {
            options
        }
    }

    /// Subscriptions to preload into the store.
    pub fn saved_subscriptions(&self) -> Vec<SavedSubscription> {
        self.subscriptions.iter().map(SavedSubscription::from).collect()
    }
}

// Global settings instance
static GLOBAL: Lazy<RwLock<Arc<Settings>>> = Lazy::new(|| RwLock::new(Arc::new(Settings::new())));

fn replace_global(settings: Settings) {
    *GLOBAL.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(settings);
}

/// Load settings from `path` and make them current.
///
/// On error the current settings are left in place.
pub fn update_settings_from_file<P: AsRef<Path>>(path: P) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let settings = Settings::load_from_file(path)?;
    info!("Loaded settings from {}", path.display());
    replace_global(settings);
    Ok(())
}

pub fn update_settings_from_content(content: &str) -> Result<(), SettingsError> {
    let settings = Settings::load_from_content(content)?;
    replace_global(settings);
    Ok(())
}
