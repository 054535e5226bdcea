//! Convert proxy subscriptions into Clash configurations grouped by the
//! country each server is located in.

pub mod constants;
pub mod generator;
pub mod geo;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main proxy types for easier access
pub use models::{AppState, ProxyKind, ProxyNode, SavedSubscription};

pub use generator::generate_clash_config;
pub use geo::{GeoCache, GeoOptions, GeoResolver};
pub use interfaces::{convert_content, ConvertError};
pub use parser::explode_sub;
pub use settings::Settings;
