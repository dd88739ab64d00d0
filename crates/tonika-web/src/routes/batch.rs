//! Spreadsheet upload handler.
//!
//! A missing required column is answered with `200 {"error": ...}`;
//! callers have to inspect the payload shape. Unreadable uploads are 400,
//! inference failures 500.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};

use tonika_core::Sheet;

use crate::state::AppState;

/// Multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

struct Upload {
    file_name: Option<String>,
    bytes: Bytes,
}

/// POST /analyze-file/ - Score every row of an uploaded spreadsheet.
pub async fn analyze_file(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(rejection) => return rejection.into_response(),
    };

    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = upload.bytes.len(),
        "Received spreadsheet"
    );

    let sheet = match Sheet::from_bytes(&upload.bytes) {
        Ok(sheet) => sheet,
        Err(e) => {
            warn!(error = %e, "Rejected upload");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.analyzer.analyze_sheet(&sheet).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) if e.is_validation() => {
            info!(reason = %e, "Spreadsheet failed validation");
            Json(json!({ "error": e.to_string() })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Batch analysis failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Take the `file` field, or failing that the first field with a file name.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, (StatusCode, String)> {
    let mut fallback = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let file_name = field.file_name().map(str::to_string);
        if !is_file_field && (file_name.is_none() || fallback.is_some()) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;
        let upload = Upload { file_name, bytes };

        if is_file_field {
            return Ok(upload);
        }
        fallback = Some(upload);
    }

    fallback.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("Missing multipart field '{FILE_FIELD}'"),
        )
    })
}
