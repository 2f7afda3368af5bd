//! API layer -- axum routes, handlers, and error mapping.

mod routes;
pub mod state;

use self::state::AppState;
use crate::detect::DetectError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Build the application router with all API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

/// Handler error: a classification failure rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(DetectError);

impl From<DetectError> for ApiError {
    fn from(err: DetectError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DetectError::DateNotFound { date } => {
                warn!(%date, "Requested date not in dataset");
                StatusCode::NOT_FOUND
            }
            DetectError::StreakOutOfRange { .. } | DetectError::EmptyWindow => {
                error!(error = %self.0, "Classification failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({
            "data": null,
            "error": { "message": self.0.to_string() }
        });
        (status, Json(body)).into_response()
    }
}
