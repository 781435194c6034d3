use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use route_quote::sdk::routing::error::RoutingError;
use route_quote::sdk::routing::service::{DirectionsProvider, RouteLeg};
use route_quote::sdk::server::{router, AppState};
use route_quote::sdk::staticmap::MapPublisher;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedProvider(Vec<RouteLeg>);

#[async_trait]
impl DirectionsProvider for FixedProvider {
    async fn directions(
        &self,
        _origin: &str,
        _destination: &str,
        _departure: DateTime<Utc>,
    ) -> Result<Vec<RouteLeg>, RoutingError> {
        Ok(self.0.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl DirectionsProvider for FailingProvider {
    async fn directions(
        &self,
        _origin: &str,
        _destination: &str,
        _departure: DateTime<Utc>,
    ) -> Result<Vec<RouteLeg>, RoutingError> {
        Err(RoutingError::Generic(
            "directions backend unreachable".to_string(),
        ))
    }
}

struct HostedMap;

#[async_trait]
impl MapPublisher for HostedMap {
    async fn publish(&self, _origin: &str, _destination: &str, _polyline: &str) -> Option<String> {
        Some("https://img.example/map.png".to_string())
    }
}

struct BrokenMap;

#[async_trait]
impl MapPublisher for BrokenMap {
    async fn publish(&self, _origin: &str, _destination: &str, _polyline: &str) -> Option<String> {
        // A publisher that hit a render/upload failure reports None.
        None
    }
}

struct UnreachableMap;

#[async_trait]
impl MapPublisher for UnreachableMap {
    async fn publish(&self, _origin: &str, _destination: &str, _polyline: &str) -> Option<String> {
        panic!("map publishing must not run for this request");
    }
}

fn leg(distance_m: f64, duration_s: i64) -> RouteLeg {
    RouteLeg {
        distance_m,
        duration_s,
        polyline: "gfo}EtohhU".to_string(),
    }
}

fn app(provider: Arc<dyn DirectionsProvider>, maps: Arc<dyn MapPublisher>) -> axum::Router {
    router(AppState { provider, maps }, None)
}

async fn post_json(app: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn taipei_taichung() -> Value {
    json!({ "origin": "Taipei", "destination": "Taichung" })
}

#[tokio::test]
async fn quote_happy_path() {
    let app = app(
        Arc::new(FixedProvider(vec![leg(150000.0, 7200)])),
        Arc::new(HostedMap),
    );
    let (status, body) = post_json(app, "/route", taipei_taichung()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance_km"], 150.0);
    assert_eq!(body["duration_min"], 120);
    assert_eq!(body["fee"], 900);
    assert_eq!(body["routes"], json!([{ "distance_km": 150.0, "duration_min": 120 }]));
    assert_eq!(body["map_url"], "https://img.example/map.png");
    assert_eq!(
        body["map_link"],
        "https://www.google.com/maps/dir/Taipei/Taichung"
    );
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("Taipei"));
    assert!(report.contains("Taichung"));
    assert!(report.contains("=900("));
}

#[tokio::test]
async fn root_post_is_an_alias_for_route() {
    let provider = Arc::new(FixedProvider(vec![leg(150000.0, 7200)]));
    let (status, body) = post_json(
        app(provider.clone(), Arc::new(HostedMap)),
        "/",
        taipei_taichung(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee"], 900);
}

#[tokio::test]
async fn fastest_alternative_wins() {
    let app = app(
        Arc::new(FixedProvider(vec![
            leg(30000.0, 2400),
            leg(42000.0, 1800),
            leg(35000.0, 2100),
        ])),
        Arc::new(HostedMap),
    );
    let (status, body) = post_json(app, "/route", taipei_taichung()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_min"], 30);
    assert_eq!(body["distance_km"], 42.0);
    assert_eq!(body["fee"], 252);
    assert_eq!(body["routes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_routes_is_not_found_and_skips_map_publishing() {
    let app = app(Arc::new(FixedProvider(vec![])), Arc::new(UnreachableMap));
    let (status, body) = post_json(app, "/route", taipei_taichung()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "no route found" }));
}

#[tokio::test]
async fn provider_failure_is_internal_error() {
    let app = app(Arc::new(FailingProvider), Arc::new(UnreachableMap));
    let (status, body) = post_json(app, "/route", taipei_taichung()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("directions backend unreachable"));
}

#[tokio::test]
async fn failed_map_publish_still_returns_a_full_quote() {
    let app = app(
        Arc::new(FixedProvider(vec![leg(150000.0, 7200)])),
        Arc::new(BrokenMap),
    );
    let (status, body) = post_json(app, "/route", taipei_taichung()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["map_url"], Value::Null);
    assert_eq!(body["fee"], 900);
    assert!(body["report"].as_str().unwrap().contains("Taipei"));
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(Arc::new(FailingProvider), Arc::new(BrokenMap));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
