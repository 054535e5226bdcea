use std::sync::{Arc, RwLock};

use linked_hash_map::LinkedHashMap;

use super::subscription::SavedSubscription;
use crate::geo::GeoResolver;
use crate::settings::Settings;
use crate::utils::http::{FetchError, HttpTransport, Transport};

/// Application state shared by the web handlers and the refresh task
pub struct AppState<T: Transport = HttpTransport> {
    /// Settings the state was built from
    pub config: Arc<Settings>,

    /// Saved subscriptions in insertion order
    subscriptions: RwLock<LinkedHashMap<String, SavedSubscription>>,

    resolver: GeoResolver<T>,
}

impl AppState<HttpTransport> {
    /// Create the state used by the server: a `reqwest` transport and the
    /// subscriptions declared in the settings.
    pub fn new(config: Arc<Settings>) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(&config.fetch.user_agent)?;
        let resolver = GeoResolver::new(transport, config.geo_options());
        Ok(Self::with_resolver(config, resolver))
    }
}

impl<T: Transport> AppState<T> {
    pub fn with_resolver(config: Arc<Settings>, resolver: GeoResolver<T>) -> Self {
        let mut subscriptions = LinkedHashMap::new();
        for sub in config.saved_subscriptions() {
            subscriptions.insert(sub.id.clone(), sub);
        }

        Self {
            config,
            subscriptions: RwLock::new(subscriptions),
            resolver,
        }
    }

    pub fn resolver(&self) -> &GeoResolver<T> {
        &self.resolver
    }

    pub fn transport(&self) -> &T {
        self.resolver.transport()
    }

    pub fn list_subscriptions(&self) -> Vec<SavedSubscription> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn get_subscription(&self, id: &str) -> Option<SavedSubscription> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Insert or replace a subscription, keeping its position when it
    /// already exists.
    pub fn upsert_subscription(&self, sub: SavedSubscription) {
        let mut subs = self.subscriptions.write().unwrap_or_else(|e| e.into_inner());
        match subs.get_mut(&sub.id) {
            Some(existing) => *existing = sub,
            None => {
                subs.insert(sub.id.clone(), sub);
            }
        }
    }

    /// Store a freshly generated document for `id`.
    ///
    /// Returns false when the subscription was removed meanwhile.
    pub fn store_config(&self, id: &str, config: String, refreshed_at: u64) -> bool {
        let mut subs = self.subscriptions.write().unwrap_or_else(|e| e.into_inner());
        match subs.get_mut(id) {
            Some(sub) => {
                sub.config = config;
                sub.last_refresh = refreshed_at;
                true
            }
            None => false,
        }
    }

    /// Record that a scheduled refresh of `id` was started at `at`.
    pub fn mark_attempt(&self, id: &str, at: u64) {
        if let Some(sub) = self
            .subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(id)
        {
            sub.last_attempt = at;
        }
    }

    pub fn remove_subscription(&self, id: &str) -> Option<SavedSubscription> {
        self.subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
    }
}
