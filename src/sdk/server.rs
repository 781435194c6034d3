use crate::sdk::quote::{self, CandidateRoute, QuoteError};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::DirectionsProvider;
use crate::sdk::staticmap::MapPublisher;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Quote endpoint path. `POST /` is kept as an alias.
pub const ROUTE_PATH: &str = "/route";
/// URL prefix for locally stored map images.
pub const STATIC_PREFIX: &str = "/static";

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DirectionsProvider>,
    pub maps: Arc<dyn MapPublisher>,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub routes: Vec<CandidateRoute>,
    pub distance_km: f64,
    pub duration_min: i64,
    pub fee: i64,
    pub report: String,
    pub map_url: Option<String>,
    pub map_link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no route found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (code, body).into_response()
    }
}

impl From<RoutingError> for ApiError {
    fn from(e: RoutingError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Builds the service router. When `static_dir` is set, locally stored map
/// images are served under [`STATIC_PREFIX`].
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ROUTE_PATH, post(quote_route))
        .route("/", post(quote_route))
        .with_state(state);
    if let Some(dir) = static_dir {
        app = app.nest_service(STATIC_PREFIX, ServeDir::new(dir));
    }
    app
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn quote_route(
    State(st): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let legs = st
        .provider
        .directions(&req.origin, &req.destination, Utc::now())
        .await?;

    let today = Local::now().date_naive();
    let quote = match quote::build_quote(&req.origin, &req.destination, &legs, today) {
        Ok(q) => q,
        Err(QuoteError::NoRoute) => return Err(ApiError::NotFound),
    };

    // Best-effort: a failed render degrades to map_url: null.
    let map_url = st
        .maps
        .publish(&req.origin, &req.destination, &quote.map_polyline)
        .await;

    Ok(Json(QuoteResponse {
        routes: quote.routes,
        distance_km: quote.distance_km,
        duration_min: quote.duration_min,
        fee: quote.fee,
        report: quote.report,
        map_url,
        map_link: quote.map_link,
    }))
}
