use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

static GLOBAL_CACHE: Lazy<Arc<GeoCache>> = Lazy::new(|| Arc::new(GeoCache::new()));

/// Host → country code cache.
///
/// Entries are never evicted. An entry is written at most once: the first
/// writer for a host wins and later inserts for the same host are ignored,
/// which is fine because every writer for a host computes the same answer.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: RwLock<HashMap<String, String>>,
}

impl GeoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> Arc<GeoCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    pub fn get(&self, host: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(host)
            .cloned()
    }

    /// Records a result for `host` and returns the value now cached.
    pub fn insert(&self, host: &str, country: &str) -> String {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(host.to_string())
            .or_insert_with(|| country.to_string())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
