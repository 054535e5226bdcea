#![cfg(feature = "web-api")]

mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use sub2clash::models::AppState;
use sub2clash::settings::Settings;
use sub2clash::web_handlers::interfaces::config;

use common::*;

fn app_state(transport: MockTransport) -> web::Data<Arc<AppState<MockTransport>>> {
    let state = AppState::with_resolver(Arc::new(Settings::default()), resolver(transport));
    web::Data::new(Arc::new(state))
}

#[cfg(test)]
mod web_handler_tests {
    use super::*;

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(MockTransport::new(geo_table())))
                .configure(config::<MockTransport>),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_convert() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(MockTransport::new(geo_table())))
                .configure(config::<MockTransport>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/convert")
            .set_payload(encoded_subscription(&[SS_TOKYO, TROJAN_NY]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/yaml; charset=utf-8"
        );
        let body = test::read_body(resp).await;
        let doc: serde_yaml::Value = serde_yaml::from_slice(&body).unwrap();
        assert_eq!(doc["proxies"].as_sequence().unwrap().len(), 2);

        let req = test::TestRequest::post()
            .uri("/convert")
            .set_payload("nothing to see here")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No valid nodes found");
    }

    #[actix_web::test]
    async fn test_subscription_lifecycle() {
        let transport = MockTransport::new(geo_table());
        transport.serve("https://sub.example.com/a", encoded_subscription(&[SS_OSAKA]));
        let app = test::init_service(
            App::new()
                .app_data(app_state(transport))
                .configure(config::<MockTransport>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/subscriptions")
            .set_json(json!({ "id": "mine", "name": "Mine", "sourceUrl": "https://sub.example.com/a" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true, "id": "mine" }));

        let req = test::TestRequest::get().uri("/subscriptions").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list[0]["id"], "mine");
        assert_eq!(list[0]["sourceUrl"], "https://sub.example.com/a");
        assert!(list[0]["config"].as_str().unwrap().contains("Osaka"));

        let req = test::TestRequest::get().uri("/sub/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"clash-config-mine.yaml\""
        );
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("🇯🇵 日本 | Osaka"));

        let req = test::TestRequest::delete().uri("/subscriptions/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/sub/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_save_generates_id_and_requires_conversion() {
        let transport = MockTransport::new(geo_table());
        transport.serve("https://sub.example.com/ok", SS_TOKYO);
        let app = test::init_service(
            App::new()
                .app_data(app_state(transport))
                .configure(config::<MockTransport>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/subscriptions")
            .set_json(json!({ "sourceUrl": "https://sub.example.com/ok" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let req = test::TestRequest::post()
            .uri("/subscriptions")
            .set_json(json!({ "id": "broken", "sourceUrl": "https://sub.example.com/missing" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let req = test::TestRequest::post()
            .uri("/subscriptions")
            .set_json(json!({ "name": "no url" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/subscriptions").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }
}
