//! API route definitions.

use super::state::AppState;
use super::ApiError;
use crate::report::{slider_marks, DashboardView};
use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/dates", get(list_dates))
        .route("/dashboard", get(dashboard))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "rows": state.engine.dataset().len()
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

async fn list_dates(State(state): State<AppState>) -> Json<Value> {
    let dataset = state.engine.dataset();
    let marks = slider_marks(dataset);
    Json(json!({
        "data": marks,
        "meta": {
            "total": marks.len(),
            "first": dataset.first_date(),
            "last": dataset.last_date()
        }
    }))
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    date: NaiveDate,
    trailing_days: Option<usize>,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Value>, ApiError> {
    let trailing_days = query
        .trailing_days
        .unwrap_or_else(|| state.engine.trailing_days());
    let evaluation = state.engine.evaluate_with(query.date, trailing_days)?;
    let view = DashboardView::new(evaluation, trailing_days);

    Ok(Json(json!({
        "data": view,
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339()
        }
    })))
}
