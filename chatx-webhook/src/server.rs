//! HTTP shim for the bot-framework webhook.
//!
//! One POST route hands the raw activity and Authorization header to the
//! configured [`ActivityProcessor`] and maps its contract onto HTTP statuses.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::dispatcher::ActivityProcessor;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Processor invoked for each inbound activity.
    pub processor: Arc<dyn ActivityProcessor>,
}

/// Builds the HTTP router for the webhook service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(messages))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handles an inbound bot-framework activity.
///
/// Processor returning nothing responds 201 with an empty body; an invoke
/// response is passed through as status plus optional JSON body; a processing
/// error responds 500 with one logged error entry.
async fn messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(activity): Json<Value>,
) -> Response {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let activity_type = activity
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    info!(activity_type = %activity_type, "received activity");

    match state.processor.process_activity(activity, auth_header).await {
        Ok(None) => StatusCode::CREATED.into_response(),
        Ok(Some(invoke)) => {
            let status = StatusCode::from_u16(invoke.status).unwrap_or(StatusCode::OK);
            match invoke.body {
                Some(body) => (status, Json(body)).into_response(),
                None => status.into_response(),
            }
        }
        Err(e) => {
            error!(error = %e, "activity processing failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
