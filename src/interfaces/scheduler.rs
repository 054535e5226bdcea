use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::subconverter::refresh_subscription;
use crate::models::AppState;
use crate::utils::http::Transport;

/// Refreshes every auto-refreshing subscription that is due at `now`.
///
/// Subscriptions are refreshed one after another. Returns how many
/// refreshes succeeded.
pub async fn run_due_refreshes<T: Transport>(state: &AppState<T>, now: u64) -> usize {
    let due: Vec<String> = state
        .list_subscriptions()
        .into_iter()
        .filter(|sub| sub.is_refresh_due(now))
        .map(|sub| sub.id)
        .collect();

    if due.is_empty() {
        debug!("No subscriptions due for refresh");
        return 0;
    }

    let mut refreshed = 0;
    for id in &due {
        state.mark_attempt(id, now);
        match refresh_subscription(state, id).await {
            Ok(_) => refreshed += 1,
            Err(e) => warn!("Auto refresh of {} failed: {}", id, e),
        }
    }
    info!("Auto refresh: {}/{} subscriptions updated", refreshed, due.len());
    refreshed
}

/// Starts the background auto refresh loop.
///
/// Returns `None` when auto refresh is disabled in the settings.
pub fn spawn_auto_refresh<T>(state: Arc<AppState<T>>) -> Option<JoinHandle<()>>
where
    T: Transport + 'static,
{
    if !state.config.refresh.enable {
        info!("Auto refresh disabled");
        return None;
    }

    let period = Duration::from_secs(state.config.refresh.check_interval_secs.max(1));
    info!("Auto refresh checking every {}s", period.as_secs());

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_due_refreshes(&*state, crate::models::unix_now()).await;
        }
    }))
}
