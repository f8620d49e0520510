use std::time::Instant;

use axum::{
    Json,
    extract::{Form, State},
    response::Html,
};
use serde::Deserialize;
use tracing::{error, info};

use super::page::render_page;
use crate::app::AppState;
use crate::classification::Verdict;
use crate::error::DetectorError;

#[derive(Debug, Deserialize)]
pub struct NewsForm {
    #[serde(default)]
    pub news: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Handler for GET /
pub async fn form_page() -> Html<String> {
    Html(render_page(None, None))
}

/// Handler for POST / (form field `news`)
pub async fn form_submit(
    State(state): State<AppState>,
    Form(form): Form<NewsForm>,
) -> Result<Html<String>, DetectorError> {
    let verdict = classify(&state, &form.news)?;
    Ok(Html(render_page(Some(&form.news), Some(&verdict))))
}

/// Handler for POST /v1/predict
pub async fn predict_json(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Verdict>, DetectorError> {
    classify(&state, &request.text).map(Json)
}

fn classify(state: &AppState, text: &str) -> Result<Verdict, DetectorError> {
    let started = Instant::now();
    match state.classifier().classify(text) {
        Ok(verdict) => {
            state
                .metrics()
                .record_prediction(verdict.label, started.elapsed());
            info!(
                label = %verdict.label,
                confidence_pct = verdict.confidence_pct,
                text_len = text.len(),
                "Classified text"
            );
            Ok(verdict)
        }
        Err(e) => {
            state.metrics().record_failure();
            error!("Failed to classify text: {e}");
            Err(e)
        }
    }
}
