//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::core::client::TranslationGateway;
use crate::core::errors::GatewayError;
use crate::core::models::{TranslationRequest, TranslationResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<TranslationGateway>,
}

impl AppState {
    pub fn new(gateway: TranslationGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Gateway error rendered as `{ "detail": ... }`
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse {
            detail: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check, translate),
    components(schemas(TranslationRequest, TranslationResult, HealthResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// Health check handler
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "AI translation assistant API is running".to_string(),
        status: "ok".to_string(),
    })
}

/// Translation handler
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslationRequest,
    responses(
        (status = 200, description = "Translation and up to three keywords", body = TranslationResult),
        (status = 400, description = "Empty or over-length text", body = ErrorResponse),
        (status = 500, description = "Missing credential or unusable model reply", body = ErrorResponse)
    )
)]
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslationRequest>,
) -> Result<Json<TranslationResult>, ApiError> {
    let result = state.gateway.translate(&payload.text).await?;
    Ok(Json(result))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router with CORS open to every origin
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/openapi.json", get(openapi))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(gateway: TranslationGateway, host: String, port: u16) -> anyhow::Result<()> {
    let app = build_router(AppState::new(gateway));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
