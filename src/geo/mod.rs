//! Geolocation of proxy servers.
//!
//! Hosts are resolved through an ordered chain of public lookup services
//! with a process-wide cache in front of them.

pub mod cache;
pub mod providers;
pub mod resolver;

use std::collections::HashMap;

use crate::models::{ProxyNode, UNKNOWN_COUNTRY};

pub use cache::GeoCache;
pub use providers::{default_providers, GeoProvider};
pub use resolver::{GeoOptions, GeoResolver};

/// Returns new nodes carrying the country resolved for their server.
///
/// Servers missing from `countries` are tagged [`UNKNOWN_COUNTRY`].
pub fn annotate_countries(nodes: &[ProxyNode], countries: &HashMap<String, String>) -> Vec<ProxyNode> {
    nodes
        .iter()
        .map(|node| {
            let country = countries
                .get(&node.server)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_COUNTRY);
            node.with_country(country)
        })
        .collect()
}
