//! Axum route handlers for the résumé download.

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::resume::builder::GenerationStatus;
use crate::resume::models::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: GenerationStatus,
    pub trigger_enabled: bool,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.resume.as_ref().clone())
}

/// GET /api/v1/resume/status
pub async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.resume_builder.status(),
        trigger_enabled: state.resume_builder.is_trigger_enabled(),
    })
}

/// POST /api/v1/resume/generate
///
/// Generates the PDF, saves a copy to the output directory and returns it as an attachment.
pub async fn handle_generate(State(state): State<AppState>) -> Result<Response, AppError> {
    let blob = state.resume_builder.generate(&state.resume).await?;

    // The file name is UTF-8 without quotes or control characters.
    let disposition =
        HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", blob.file_name).as_bytes())
            .context("file name is not a valid header value")?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        blob.bytes,
    )
        .into_response())
}
