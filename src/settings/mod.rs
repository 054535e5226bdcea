//! Settings module
//!
//! Runtime configuration loaded from a TOML or YAML document, held in one
//! process-wide instance.

pub mod settings_struct;

pub use settings_struct::{
    update_settings_from_content, update_settings_from_file, CommonSettings, FetchSettings,
    GeoSettings, RefreshSettings, Settings, SettingsError, SubscriptionSettings,
};
