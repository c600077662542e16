use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use utoipa::ToSchema;

use crate::errors::data_access::BadRequest;
use crate::errors::{error_to_http_exception, AxumJson, ErrorEnvelope, Status400};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    /// Probability (0.0..=1.0) that `/api/hello` answers with an error
    pub hello_failure_rate: f64,
    pub instance_id: String,
}

/// Greeting returned by the hello endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Greeting that randomly fails to exercise the error envelope
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "hello",
    responses(
        (status = 200, description = "Return a greeting message", body = HelloResponse),
        (status = 400, description = "Bad request", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    )
)]
pub async fn hello(State(state): State<AppState>) -> Response {
    if rand::random::<f64>() < state.hello_failure_rate {
        debug!(
            failure_rate = state.hello_failure_rate,
            "Answering hello with demonstration error"
        );
        return error_to_http_exception::<_, Status400, _>(
            AxumJson,
            &BadRequest::new("Invalid request"),
        );
    }

    Json(HelloResponse {
        message: "Hello from axum + OpenAPI!".to_string(),
    })
    .into_response()
}
