use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

fn default_refresh_interval() -> u64 {
    60
}

/// A subscription saved by the hosting layer together with the last
/// document generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSubscription {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub source_url: String,
    /// Last good configuration document.
    #[serde(default)]
    pub config: String,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: u64,
    /// Unix seconds of the last successful refresh, 0 when never refreshed.
    #[serde(default)]
    pub last_refresh: u64,
    /// Unix seconds of the last scheduled refresh attempt, successful or not.
    #[serde(default)]
    pub last_attempt: u64,
    #[serde(default)]
    pub auto_refresh: bool,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_mins: u64,
}

impl SavedSubscription {
    pub fn new(id: impl Into<String>, name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_url: source_url.into(),
            config: String::new(),
            created_at: unix_now(),
            last_refresh: 0,
            last_attempt: 0,
            auto_refresh: false,
            refresh_interval_mins: default_refresh_interval(),
        }
    }

    /// Whether an auto-refreshing subscription is due at `now` (unix seconds).
    ///
    /// Measured from the later of the last attempt and the last success, so
    /// a failing source is retried once per interval.
    pub fn is_refresh_due(&self, now: u64) -> bool {
        if !self.auto_refresh || self.refresh_interval_mins == 0 {
            return false;
        }
        let since = self.last_attempt.max(self.last_refresh);
        now.saturating_sub(since) >= self.refresh_interval_mins.saturating_mul(60)
    }
}

/// Current time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
