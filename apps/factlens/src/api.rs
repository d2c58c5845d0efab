//! # HTTP API
//!
//! JSON endpoints over the analyzer.
//!
//! | Method | Path      | Body            | Response          |
//! |--------|-----------|-----------------|-------------------|
//! | GET    | `/health` |                 | `HealthResponse`  |
//! | POST   | `/analyze`| `{"text": ...}` | `AnalysisReport`  |
//! | POST   | `/check`  | `{"text": ...}` | `CheckReport`     |
//! | POST   | `/lookup` | `{"text": ...}` | `LookupResponse`  |
//! | GET    | `/rules`  |                 | `[RuleSummary]`   |
//!
//! When an API key is configured every route except `/health` requires
//! `Authorization: Bearer <key>`.

use crate::analyzer::{Analyzer, CheckReport};
use crate::config::ServerConfig;
use crate::error::{AppError, validate_text};
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use factlens_core::rules::RuleSummary;
use factlens_core::{AnalysisReport, Reference};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

// =============================================================================
// STATE
// =============================================================================

/// Shared state for all handlers.
pub struct AppState {
    pub analyzer: Analyzer,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { analyzer, api_key }
    }
}

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub classifier_loaded: bool,
    pub web_search_enabled: bool,
    pub reference_enabled: bool,
    pub rule_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error with an HTTP status.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::TextTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ClassifierUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            other => {
                error!(error = %other, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the router with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/check", post(check_handler))
        .route("/lookup", post(lookup_handler))
        .route("/rules", get(rules_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), AppError> {
    if state.api_key.is_none() {
        warn!("no API key configured; every route is open");
    }
    let app = create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| bool::from(token.as_bytes().ct_eq(expected.as_bytes())));

    if authorized {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "rejected unauthenticated request");
    let body = ErrorResponse {
        error: String::from("missing or invalid API key"),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let analyzer = &state.analyzer;
    Json(HealthResponse {
        status: String::from("ok"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        classifier_loaded: analyzer.has_classifier(),
        web_search_enabled: analyzer.web_search_enabled(),
        reference_enabled: analyzer.reference_enabled(),
        rule_count: analyzer.rules().len(),
    })
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let text = validate_text(&request.text)?;
    Ok(Json(state.analyzer.analyze(text).await?))
}

async fn check_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<CheckReport>, ApiError> {
    let text = validate_text(&request.text)?;
    Ok(Json(state.analyzer.check(text).await))
}

async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    let text = validate_text(&request.text)?;
    let outcome = state.analyzer.lookup(text).await;
    Ok(Json(LookupResponse {
        found: outcome.found(),
        reference: outcome.reference().cloned(),
        error: outcome.error().map(str::to_string),
    }))
}

async fn rules_handler(State(state): State<Arc<AppState>>) -> Json<Vec<RuleSummary>> {
    Json(state.analyzer.rules().summaries())
}
