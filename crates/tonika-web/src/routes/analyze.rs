//! Single-text analysis handler.

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use tonika_core::{AnalysisRequest, AnalysisResult};

use crate::state::AppState;

/// POST /analyze/ - Classify one text.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let result = state.analyzer.analyze_text(&req.text).await.map_err(|e| {
        error!(error = %e, "Text analysis failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(result))
}
