use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use thiserror::Error;

/// Default timeout for subscription downloads in seconds
pub const DEFAULT_TIMEOUT: u64 = 15;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to send request: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Something that can GET a URL and hand back the body as text.
///
/// Subscription downloads and geolocation lookups both go through this, so
/// tests can swap the network for a canned implementation.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

/// Downloads a subscription body.
///
/// Non-2xx responses, timeouts and network errors are all reported as
/// [`FetchError`]; the caller decides whether to fall back to a cached
/// document.
pub async fn fetch_subscription<T: Transport>(
    transport: &T,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    match tokio::time::timeout(timeout, transport.get(url, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout),
    }
}
