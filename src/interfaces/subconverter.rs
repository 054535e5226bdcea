use std::time::Duration;

use log::{info, warn};

use super::ConvertError;
use crate::generator::generate_clash_config;
use crate::geo::{annotate_countries, GeoResolver};
use crate::models::{unix_now, AppState};
use crate::parser::explode_sub;
use crate::utils::http::{fetch_subscription, Transport};

/// Converts subscription text into a Clash document.
///
/// Decodes the nodes, places every distinct server with `resolver` and
/// renders the grouped configuration. Text without a single valid node is
/// the only hard failure.
pub async fn convert_content<T: Transport>(
    content: &str,
    resolver: &GeoResolver<T>,
) -> Result<String, ConvertError> {
    let nodes = explode_sub(content);
    if nodes.is_empty() {
        return Err(ConvertError::NoValidNodes);
    }

    let hosts: Vec<&str> = nodes.iter().map(|n| n.server.as_str()).collect();
    let countries = resolver.resolve_many(&hosts).await;
    let annotated = annotate_countries(&nodes, &countries);

    info!(
        "Converted {} nodes across {} servers",
        annotated.len(),
        countries.len()
    );
    Ok(generate_clash_config(&annotated)?)
}

/// Downloads `url` through the resolver's transport and converts it.
pub async fn convert_url<T: Transport>(
    url: &str,
    resolver: &GeoResolver<T>,
    timeout: Duration,
) -> Result<String, ConvertError> {
    let content = fetch_subscription(resolver.transport(), url, timeout).await?;
    convert_content(&content, resolver).await
}

/// Re-fetches and re-converts a saved subscription.
///
/// The new document is stored only on success; on any failure the stored
/// document is left as it was and the error is returned.
pub async fn refresh_subscription<T: Transport>(
    state: &AppState<T>,
    id: &str,
) -> Result<String, ConvertError> {
    let sub = state
        .get_subscription(id)
        .ok_or_else(|| ConvertError::NotFound(id.to_string()))?;

    let config = convert_url(&sub.source_url, state.resolver(), state.config.fetch_timeout()).await?;

    if !state.store_config(id, config.clone(), unix_now()) {
        return Err(ConvertError::NotFound(id.to_string()));
    }
    info!("Refreshed subscription {}", id);
    Ok(config)
}

/// Returns an up-to-date document for a saved subscription.
///
/// A failed refresh falls back to the last stored document when there is
/// one.
pub async fn serve_subscription<T: Transport>(
    state: &AppState<T>,
    id: &str,
) -> Result<String, ConvertError> {
    match refresh_subscription(state, id).await {
        Ok(config) => Ok(config),
        Err(ConvertError::NotFound(id)) => Err(ConvertError::NotFound(id)),
        Err(e) => match state.get_subscription(id) {
            Some(sub) if !sub.config.is_empty() => {
                warn!("Refresh of {} failed, serving stored config: {}", id, e);
                Ok(sub.config)
            }
            _ => Err(e),
        },
    }
}
