pub mod health;
pub mod metrics;
pub mod page;
pub mod predict;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::DetectorError;

impl IntoResponse for DetectorError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed").into_response()
    }
}
