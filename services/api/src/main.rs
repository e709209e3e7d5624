//! API Service - Public HTTP API for the COVID-19 dashboard
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /api/countries - Country picker contents ("Global" first)
//! - GET /api/countries/:name - Combined summary for one country
//!
//! The aggregation itself lives in the `stats` crate; this service only
//! maps its results and errors onto JSON and status codes.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use stats::{DataPaths, StatsError, StatsService};
use tower_http::cors::{Any, CorsLayer};

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
struct AppState {
    service: Arc<StatsService>,
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// A country we have no confirmed rows for is a 404; anything wrong with
/// the source files is a 500.
fn error_status(err: &StatsError) -> StatusCode {
    match err {
        StatsError::NotFound { .. } => StatusCode::NOT_FOUND,
        StatsError::Io { .. } | StatsError::Csv { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: StatsError) -> Response {
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: "0.1.0",
    })
}

async fn countries_handler(State(state): State<AppState>) -> Response {
    match state.service.countries().await {
        Ok(countries) => Json(countries).into_response(),
        Err(e) => {
            eprintln!("Error fetching countries: {e}");
            error_response(e)
        }
    }
}

async fn country_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.service.country_data(&name).await {
        Ok(summary) => Json(summary).into_response(),
        // Expected during normal operation (bad picker input), not logged.
        Err(e @ StatsError::NotFound { .. }) => error_response(e),
        Err(e) => {
            eprintln!("Error fetching data for {name}: {e}");
            error_response(e)
        }
    }
}

async fn fallback_handler() -> Response {
    (StatusCode::NOT_FOUND, "API endpoint not found").into_response()
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let data_dir = std::env::var("DATA_DIR").context("DATA_DIR env var missing")?;
    let bind = std::env::var("API_BIND").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    println!("=== COVID-19 Stats API ===");
    println!("Serving time-series data from {}", data_dir);

    let service = Arc::new(StatsService::new(DataPaths::from_data_dir(&data_dir)));

    // CORS for the web dashboard
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/countries", get(countries_handler))
        .route("/api/countries/:name", get(country_handler))
        .fallback(fallback_handler)
        .layer(cors)
        .with_state(AppState { service });

    println!("API listening on http://{}", bind);
    println!("\nEndpoints:");
    println!("  GET /health");
    println!("  GET /api/countries");
    println!("  GET /api/countries/:name");

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
