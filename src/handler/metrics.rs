use axum::{extract::State, http::header, response::IntoResponse};

use crate::app::AppState;

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics().render(),
    )
}
