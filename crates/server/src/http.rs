//! HTTP Endpoints
//!
//! REST API for lead scoring, health and administration.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::time::{Duration, Instant};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use lead_triage_config::constants::{routes, server};
use lead_triage_core::{LeadScoreRequest, LeadScoreResponse};

use crate::metrics::{metrics_handler, record_lead, record_request};
use crate::state::AppState;
use crate::ServerError;

const SUCCESSOR_LINK: &str = "</api/leads/score>; rel=\"successor-version\"";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let (cors_layer, timeout) = {
        let config = state.get_config();
        (
            build_cors_layer(&config.server.cors_origins, config.server.cors_enabled),
            Duration::from_secs(config.server.timeout_seconds),
        )
    };

    Router::new()
        // Lead scoring
        .route(routes::LEAD_SCORE, post(score_lead))
        .route(routes::LEAD_SCORE_ALIAS, post(score_lead_alias))
        // Health
        .route(routes::HEALTH, get(health_check))
        .route(routes::HEALTHCHECK, get(health_check))
        // Prometheus metrics
        .route(routes::METRICS, get(metrics_endpoint))
        // Admin
        .route(routes::RELOAD_CONFIG, post(reload_config))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if parsed_origins.is_empty() {
        if !origins.is_empty() {
            tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        }
        return cors.allow_origin(HeaderValue::from_static(server::DEFAULT_CORS_ORIGIN));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    cors.allow_origin(parsed_origins)
}

/// POST /api/leads/score
async fn score_lead(
    State(state): State<AppState>,
    Json(request): Json<LeadScoreRequest>,
) -> Result<Json<LeadScoreResponse>, ServerError> {
    record_request(routes::LEAD_SCORE);
    evaluate(&state, &request).map(Json)
}

/// POST /api/score-lead
///
/// Deprecated alias of `/api/leads/score`.
async fn score_lead_alias(
    State(state): State<AppState>,
    Json(request): Json<LeadScoreRequest>,
) -> Result<impl IntoResponse, ServerError> {
    record_request(routes::LEAD_SCORE_ALIAS);
    let response = evaluate(&state, &request)?;
    Ok((
        [
            (HeaderName::from_static("deprecation"), HeaderValue::from_static("true")),
            (header::LINK, HeaderValue::from_static(SUCCESSOR_LINK)),
        ],
        Json(response),
    ))
}

fn evaluate(state: &AppState, request: &LeadScoreRequest) -> Result<LeadScoreResponse, ServerError> {
    if request.is_empty() {
        return Err(ServerError::InvalidRequest(
            "chat_history or preferences must be provided".to_string(),
        ));
    }

    let scorer = state.scorer();
    let started = Instant::now();
    let response = scorer.score_lead(request);
    let elapsed = started.elapsed();

    if state.get_config().observability.metrics_enabled {
        record_lead(&response, elapsed);
    }
    tracing::info!(
        scorer = scorer.name(),
        score = response.score,
        tag = %response.tag,
        escalate = response.escalate,
        elapsed_us = elapsed.as_micros() as u64,
        "Lead scored"
    );

    Ok(response)
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "scorer": state.scorer().name(),
    }))
}

/// GET /metrics
async fn metrics_endpoint(State(state): State<AppState>) -> axum::response::Response {
    if !state.get_config().observability.metrics_enabled {
        return (StatusCode::NOT_FOUND, "Metrics disabled").into_response();
    }
    metrics_handler().await
}

/// Config reload endpoint
///
/// POST /admin/reload-config
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully"
            })),
        ),
        Err(e) => {
            tracing::error!("Config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e.to_string()
                })),
            )
        },
    }
}
