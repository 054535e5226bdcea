use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info};

use super::cache::GeoCache;
use super::providers::{default_providers, GeoProvider};
use crate::models::UNKNOWN_COUNTRY;
use crate::utils::http::Transport;
use crate::utils::url::url_encode;

/// Default per-provider timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Default number of concurrent lookups per batch
const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between batches in milliseconds
const DEFAULT_BATCH_PAUSE_MS: u64 = 200;

/// Tuning for [`GeoResolver`]
#[derive(Debug, Clone)]
pub struct GeoOptions {
    /// Budget for a single provider request
    pub timeout: Duration,
    /// Number of hosts looked up concurrently
    pub batch_size: usize,
    /// Pause between two batches
    pub batch_pause: Duration,
    /// Relay prefix used to reach providers from environments without
    /// direct cross-origin access; the provider URL is appended encoded.
    pub cors_relay: Option<String>,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: Duration::from_millis(DEFAULT_BATCH_PAUSE_MS),
            cors_relay: None,
        }
    }
}

impl GeoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    pub fn with_cors_relay(mut self, relay: impl Into<String>) -> Self {
        self.cors_relay = Some(relay.into());
        self
    }
}

/// Resolves server hosts to two-letter country codes.
///
/// Providers are tried one at a time in order; the first well-formed answer
/// wins. Failures of any kind just move on to the next provider, and a host
/// no provider can place resolves to [`UNKNOWN_COUNTRY`]. Every answer,
/// including the unknown sentinel, is cached.
pub struct GeoResolver<T: Transport> {
    transport: T,
    providers: Vec<Box<dyn GeoProvider>>,
    cache: Arc<GeoCache>,
    options: GeoOptions,
}

impl<T: Transport> GeoResolver<T> {
    /// Creates a resolver using the default provider chain and the
    /// process-wide cache.
    pub fn new(transport: T, options: GeoOptions) -> Self {
        Self {
            transport,
            providers: default_providers(),
            cache: GeoCache::global(),
            options,
        }
    }

    pub fn with_cache(mut self, cache: Arc<GeoCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_providers(mut self, providers: Vec<Box<dyn GeoProvider>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn cache(&self) -> &Arc<GeoCache> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &GeoOptions {
        &self.options
    }

    fn request_url(&self, provider: &dyn GeoProvider, host: &str) -> String {
        let endpoint = provider.endpoint(host);
        match &self.options.cors_relay {
            Some(relay) => format!("{}{}", relay, url_encode(&endpoint)),
            None => endpoint,
        }
    }

    async fn query(&self, provider: &dyn GeoProvider, host: &str) -> Option<String> {
        let url = self.request_url(provider, host);
        let timeout = self.options.timeout;

        // Dropping the request future on timeout abandons the connection
        match tokio::time::timeout(timeout, self.transport.get(&url, timeout)).await {
            Ok(Ok(body)) => {
                let code = provider.extract_country(&body);
                if code.is_none() {
                    debug!("{}: malformed answer for {}", provider.name(), host);
                }
                code
            }
            Ok(Err(e)) => {
                debug!("{}: lookup for {} failed: {}", provider.name(), host, e);
                None
            }
            Err(_) => {
                debug!("{}: lookup for {} timed out", provider.name(), host);
                None
            }
        }
    }

    /// Resolves a single host, consulting the cache first.
    pub async fn resolve_one(&self, host: &str) -> String {
        if let Some(code) = self.cache.get(host) {
            return code;
        }

        for provider in &self.providers {
            if let Some(code) = self.query(provider.as_ref(), host).await {
                debug!("{} resolved {} to {}", provider.name(), host, code);
                return self.cache.insert(host, &code);
            }
        }

        debug!("No provider could place {}", host);
        self.cache.insert(host, UNKNOWN_COUNTRY)
    }

    /// Resolves many hosts.
    ///
    /// Duplicates are collapsed and cached hosts are answered directly. The
    /// rest are looked up in batches of `batch_size` concurrent lookups,
    /// with `batch_pause` between batches. The result has an entry for every
    /// distinct input host.
    pub async fn resolve_many<S: AsRef<str>>(&self, hosts: &[S]) -> HashMap<String, String> {
        let mut results = HashMap::new();
        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for host in hosts {
            let host = host.as_ref();
            if !seen.insert(host) {
                continue;
            }
            match self.cache.get(host) {
                Some(code) => {
                    results.insert(host.to_string(), code);
                }
                None => pending.push(host),
            }
        }

        if !pending.is_empty() {
            info!(
                "Resolving {} hosts ({} cached)",
                pending.len(),
                results.len()
            );
        }

        let batch_size = self.options.batch_size.max(1);
        let batches: Vec<&[&str]> = pending.chunks(batch_size).collect();
        let batch_count = batches.len();

        for (index, batch) in batches.into_iter().enumerate() {
            let resolved = join_all(batch.iter().map(|host| async move {
                (host.to_string(), self.resolve_one(host).await)
            }))
            .await;
            results.extend(resolved);

            if index + 1 < batch_count && !self.options.batch_pause.is_zero() {
                tokio::time::sleep(self.options.batch_pause).await;
            }
        }

        results
    }
}
