use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::AppState;
use crate::handler::health::health_handler;
use crate::handler::metrics::metrics_handler;
use crate::handler::predict::{form_page, form_submit, predict_json};

/// Build the HTTP router (form, JSON prediction, health and metrics).
pub fn build_router(state: AppState) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let prediction_router = Router::new()
        .route("/", get(form_page).post(form_submit))
        .route("/v1/predict", post(predict_json))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    Router::new()
        .merge(v1_health_router)
        .merge(prediction_router)
        .layer(TraceLayer::new_for_http())
}
