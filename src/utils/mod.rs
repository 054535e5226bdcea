pub mod base64;
pub mod http;
pub mod url;

// Re-export common utilities
pub use self::base64::url_safe_base64_decode;
pub use self::url::{url_decode, url_encode};
pub use http::{fetch_subscription, FetchError, HttpTransport, Transport};
