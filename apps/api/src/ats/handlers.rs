use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::extract::{extract_pdf_text, MAX_PDF_BYTES};
use crate::ats::history::{delete_check, list_checks, record_check, AtsCheck, NewCheck};
use crate::ats::samples::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME_TEXT};
use crate::ats::scoring::{ScoreBand, ScoringResult};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::AtsCheckRecord;
use crate::state::AppState;
use crate::uploads::{check_size, read_upload};

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_description: String,
}

fn validate_inputs(resume_text: &str, job_description: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text must not be empty".to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoringResult,
    pub band: ScoreBand,
}

/// POST /api/v1/ats/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    validate_inputs(&req.resume_text, &req.job_description)?;
    let result = state
        .scorer
        .score(&req.resume_text, &req.job_description)
        .await?;
    Ok(Json(ScoreResponse {
        band: ScoreBand::of(result.overall_score),
        result,
    }))
}

#[derive(Serialize)]
pub struct SampleResponse {
    pub job_description: &'static str,
    pub resume_text: &'static str,
}

/// GET /api/v1/ats/sample
pub async fn handle_sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        job_description: SAMPLE_JOB_DESCRIPTION,
        resume_text: SAMPLE_RESUME_TEXT,
    })
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub text: String,
}

/// POST /api/v1/ats/extract
/// Multipart with a `file` part holding a PDF resume.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let upload = read_upload(multipart, "file").await?;
    check_size(&upload.file.bytes, MAX_PDF_BYTES, "PDF size should be less than 10MB")?;

    let filename = upload.file.filename;
    let text = extract_pdf_text(upload.file.bytes).await?;
    info!(%filename, chars = text.len(), "Extracted resume text");
    Ok(Json(ExtractResponse { filename, text }))
}

#[derive(Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub resume_id: String,
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub record: AtsCheckRecord,
    pub result: ScoringResult,
    pub band: ScoreBand,
}

/// POST /api/v1/ats/checks
/// Scores and stores the check in the user's history.
pub async fn handle_create_check(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CheckRequest>,
) -> Result<(StatusCode, Json<CheckResponse>), AppError> {
    validate_inputs(&req.resume_text, &req.job_description)?;
    let user_id = user.user_id();

    let result = state
        .scorer
        .score(&req.resume_text, &req.job_description)
        .await?;
    info!(
        user_id = %user_id,
        scorer = state.scorer.name(),
        score = result.overall_score,
        "Scored resume"
    );

    let record = record_check(
        state.backend.as_ref(),
        &state.config.tables,
        NewCheck {
            user_id: &user_id,
            resume_id: &req.resume_id,
            job_description: &req.job_description,
            result: &result,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckResponse {
            band: ScoreBand::of(result.overall_score),
            record,
            result,
        }),
    ))
}

/// GET /api/v1/ats/checks
pub async fn handle_list_checks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<AtsCheck>>, AppError> {
    let checks = list_checks(
        state.backend.as_ref(),
        state.config.tables.ats_checks,
        &user.user_id(),
    )
    .await?;
    Ok(Json(checks))
}

/// DELETE /api/v1/ats/checks/:id
pub async fn handle_delete_check(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete_check(
        state.backend.as_ref(),
        state.config.tables.ats_checks,
        &user.user_id(),
        id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
