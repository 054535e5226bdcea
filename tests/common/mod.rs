#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sub2clash::geo::{GeoCache, GeoOptions, GeoResolver};
use sub2clash::utils::http::{FetchError, Transport};
use sub2clash::utils::base64::base64_encode;

pub const SS_TOKYO: &str = "ss://YWVzLTI1Ni1nY206cGFzcw==@10.0.0.1:8388#Tokyo";
pub const SS_OSAKA: &str = "ss://YWVzLTI1Ni1nY206cGFzcw==@10.0.0.2:8388#Osaka";
pub const TROJAN_NY: &str = "trojan://secret@10.0.0.3:443?sni=ny.example.com#New%20York";
pub const TROJAN_NOWHERE: &str = "trojan://secret@10.0.0.9:443#Nowhere";

/// Countries answered by the first geolocation provider
pub fn geo_table() -> HashMap<String, String> {
    [("10.0.0.1", "JP"), ("10.0.0.2", "JP"), ("10.0.0.3", "US")]
        .into_iter()
        .map(|(h, c)| (h.to_string(), c.to_string()))
        .collect()
}

pub fn encoded_subscription(links: &[&str]) -> String {
    base64_encode(&links.join("\n"))
}

/// In-memory transport.
///
/// Geolocation requests are answered by api.country.is from `geo`, every
/// other URL from `pages`. Anything unknown is a 404.
#[derive(Default)]
pub struct MockTransport {
    pub pages: Mutex<HashMap<String, String>>,
    pub geo: HashMap<String, String>,
    pub calls: AtomicUsize,
    pub page_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(geo: HashMap<String, String>) -> Self {
        Self {
            geo,
            ..Default::default()
        }
    }

    pub fn serve(&self, url: &str, body: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.to_string(), body.into());
    }

    pub fn take_down(&self, url: &str) {
        self.pages.lock().unwrap().remove(url);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(host) = url.strip_prefix("https://api.country.is/") {
            return match self.geo.get(host) {
                Some(code) => Ok(format!(r#"{{"ip":"{}","country":"{}"}}"#, host, code)),
                None => Err(FetchError::Status(404)),
            };
        }
        if url.contains("ipwho.is")
            || url.contains("ip-api.com")
            || url.contains("ipinfo.io")
            || url.contains("ipapi.co")
            || url.contains("freegeoip.app")
        {
            return Err(FetchError::Status(429));
        }

        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}

/// Resolver over `transport` with a private cache and no batch pause
pub fn resolver(transport: MockTransport) -> GeoResolver<MockTransport> {
    GeoResolver::new(
        transport,
        GeoOptions::new().with_batch_pause(Duration::from_millis(0)),
    )
    .with_cache(Arc::new(GeoCache::new()))
}
