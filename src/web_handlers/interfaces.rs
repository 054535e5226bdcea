use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use log::{debug, error, info};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::interfaces::subconverter::{convert_content, convert_url, serve_subscription};
use crate::interfaces::ConvertError;
use crate::models::{unix_now, AppState, SavedSubscription};
use crate::utils::http::Transport;

const YAML_CONTENT_TYPE: &str = "text/yaml; charset=utf-8";

/// Largest subscription body accepted by `POST /convert`
const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Body of `POST /subscriptions`
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    /// Generated when absent
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub auto_refresh: bool,
    pub refresh_interval_mins: Option<u64>,
}

fn error_response(err: &ConvertError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ConvertError::NoValidNodes => HttpResponse::BadRequest().json(body),
        ConvertError::NotFound(_) => HttpResponse::NotFound().json(body),
        ConvertError::Fetch(_) => HttpResponse::BadGateway().json(body),
        ConvertError::Serialize(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn yaml_response(config: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, YAML_CONTENT_TYPE))
        .body(config)
}

/// Handler for the health check
pub async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().body("sub2clash is running!")
}

/// Handler converting a raw subscription body
pub async fn convert_handler<T: Transport + 'static>(
    body: String,
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    match convert_content(&body, app_state.resolver()).await {
        Ok(config) => yaml_response(config),
        Err(e) => {
            debug!("Conversion failed: {}", e);
            error_response(&e)
        }
    }
}

/// Handler serving the latest document of a saved subscription
pub async fn sub_handler<T: Transport + 'static>(
    path: web::Path<String>,
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    let id = path.into_inner();
    match serve_subscription(&**app_state, &id).await {
        Ok(config) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, YAML_CONTENT_TYPE))
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!(
                    "clash-config-{}.yaml",
                    id
                ))],
            })
            .body(config),
        Err(e) => {
            error!("Failed to serve subscription {}: {}", id, e);
            error_response(&e)
        }
    }
}

pub async fn list_subscriptions_handler<T: Transport + 'static>(
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    HttpResponse::Ok().json(app_state.list_subscriptions())
}

pub async fn get_subscription_handler<T: Transport + 'static>(
    path: web::Path<String>,
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    let id = path.into_inner();
    match app_state.get_subscription(&id) {
        Some(sub) => HttpResponse::Ok().json(sub),
        None => error_response(&ConvertError::NotFound(id)),
    }
}

/// Handler saving a subscription
///
/// The source is converted once before saving; a source that cannot be
/// converted is rejected and nothing is stored.
pub async fn save_subscription_handler<T: Transport + 'static>(
    payload: web::Json<SubscriptionRequest>,
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    let request = payload.into_inner();
    if request.source_url.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing required fields" }));
    }

    let id = request
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let config = match convert_url(
        &request.source_url,
        app_state.resolver(),
        app_state.config.fetch_timeout(),
    )
    .await
    {
        Ok(config) => config,
        Err(e) => {
            error!("Initial conversion of {} failed: {}", request.source_url, e);
            return error_response(&e);
        }
    };

    let mut sub = match app_state.get_subscription(&id) {
        Some(existing) => existing,
        None => SavedSubscription::new(id.clone(), String::new(), String::new()),
    };
    sub.name = if request.name.is_empty() {
        id.clone()
    } else {
        request.name
    };
    sub.source_url = request.source_url;
    sub.auto_refresh = request.auto_refresh;
    if let Some(mins) = request.refresh_interval_mins {
        sub.refresh_interval_mins = mins;
    }
    sub.config = config;
    sub.last_refresh = unix_now();

    app_state.upsert_subscription(sub);
    info!("Saved subscription {}", id);
    HttpResponse::Ok().json(json!({ "success": true, "id": id }))
}

pub async fn delete_subscription_handler<T: Transport + 'static>(
    path: web::Path<String>,
    app_state: web::Data<Arc<AppState<T>>>,
) -> HttpResponse {
    let id = path.into_inner();
    match app_state.remove_subscription(&id) {
        Some(_) => {
            info!("Deleted subscription {}", id);
            HttpResponse::Ok().json(json!({ "success": true }))
        }
        None => error_response(&ConvertError::NotFound(id)),
    }
}

/// Register the routes
pub fn config<T: Transport + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_SIZE))
        .route("/", web::get().to(health_handler))
        .route("/convert", web::post().to(convert_handler::<T>))
        .route("/sub/{id}", web::get().to(sub_handler::<T>))
        .route(
            "/subscriptions",
            web::get().to(list_subscriptions_handler::<T>),
        )
        .route(
            "/subscriptions",
            web::post().to(save_subscription_handler::<T>),
        )
        .route(
            "/subscriptions/{id}",
            web::get().to(get_subscription_handler::<T>),
        )
        .route(
            "/subscriptions/{id}",
            web::delete().to(delete_subscription_handler::<T>),
        );
}
