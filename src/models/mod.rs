//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the
//! application, separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use sub2clash::models::{ProxyKind, ProxyNode};
//!
//! let node = ProxyNode::new(ProxyKind::Trojan, "Tokyo".to_string(), "example.com".to_string(), 443);
//! let tagged = node.with_country("JP");
//! assert_eq!(tagged.country.as_deref(), Some("JP"));
//! assert_eq!(node.country, None);
//! ```

mod app_state;
mod proxy;
mod subscription;

pub use app_state::AppState;
pub use proxy::*;
pub use subscription::{unix_now, SavedSubscription};
