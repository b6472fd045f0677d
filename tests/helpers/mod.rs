//! Shared setup for router-level tests: an app wired to a mock upstream.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lunchboard::config::{Config, MenuConfig, ObservabilityConfig, ServerConfig, UpstreamConfig};
use lunchboard::routes::{router, AppState};
use lunchboard_menu::{MenuFetcher, MenuService};
use tower::ServiceExt;

/// Builds the real router against `upstream_url` as the menu provider.
pub fn test_app(upstream_url: &str) -> Router {
    let config = Config {
        server: ServerConfig::default(),
        upstream: UpstreamConfig {
            root_url: upstream_url.to_string(),
            cache_ttl_seconds: 60,
            timeout_seconds: 5,
        },
        menu: MenuConfig { timezone: "UTC".to_string() },
        observability: ObservabilityConfig::default(),
    };

    let fetcher = MenuFetcher::new(
        &config.upstream.root_url,
        Duration::from_secs(config.upstream.cache_ttl_seconds),
        Duration::from_secs(config.upstream.timeout_seconds),
    )
    .expect("fetcher builds");
    let menu = MenuService::new(Arc::new(fetcher));

    router(AppState { config, menu })
}

/// Drives one GET through the router and returns status plus body text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// As [`get`], but parses the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_str(&body).unwrap_or_else(|e| panic!("bad json body: {e}: {body}"));
    (status, json)
}

/// A school week of upstream JSON for the week of Monday 2026-03-02.
pub fn sample_week_body() -> &'static str {
    r#"{
        "days": [
            {"date": "2026-03-02", "menu_items": [
                {"name": "Breakfast"},
                {"food": {"name": "Pancakes"}},
                {"name": "Lunch"},
                {"name": "Cheesy Baked Ziti with a Warm Breadstick plus Steamed Broccoli and Choice of Milk"}
            ]},
            {"date": "2026-03-03", "menu_items": [
                {"name": "Breakfast"},
                {"name": "Cereal"},
                {"name": "Lunch"},
                {"name": "Chicken Drumstick with Mashed Potatoes plus Green Beans and a Whole Grain Roll"}
            ]},
            {"date": "2026-03-06", "menu_items": [
                {"food": {"name": "No School - Staff Development"}}
            ]}
        ]
    }"#
}
