//! Conversion pipeline and subscription refresh

pub mod scheduler;
pub mod subconverter;

use thiserror::Error;

use crate::utils::http::FetchError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No valid nodes found")]
    NoValidNodes,

    #[error("Failed to fetch subscription: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Subscription not found: {0}")]
    NotFound(String),
}

pub use scheduler::{run_due_refreshes, spawn_auto_refresh};
pub use subconverter::{convert_content, convert_url, refresh_subscription, serve_subscription};
