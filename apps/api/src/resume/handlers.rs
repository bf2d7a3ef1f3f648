use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::{ProfileImage, ResumeData, ResumeRecord};
use crate::resume::defaults::default_resume;
use crate::resume::editor::{apply_command, format_skills, EditCommand};
use crate::resume::persistence::{
    delete_resume, get_resume, list_resumes, save_resume, SaveResumeRequest,
};
use crate::state::AppState;
use crate::uploads::{read_upload, validate_image};

/// GET /api/v1/resumes/default
pub async fn handle_default_resume() -> Json<ResumeData> {
    Json(default_resume())
}

#[derive(Deserialize)]
pub struct EditRequest {
    pub resume: ResumeData,
    pub command: EditCommand,
}

/// POST /api/v1/resumes/edit
pub async fn handle_edit(Json(req): Json<EditRequest>) -> Result<Json<ResumeData>, AppError> {
    let mut resume = req.resume;
    apply_command(&mut resume, req.command)?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes
pub async fn handle_save(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let status = if req.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let record = save_resume(
        state.backend.as_ref(),
        &state.config.tables,
        &user.user_id(),
        req,
    )
    .await?;
    Ok((status, Json(record)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let resumes = list_resumes(
        state.backend.as_ref(),
        state.config.tables.resumes,
        &user.user_id(),
    )
    .await?;
    Ok(Json(resumes))
}

#[derive(Serialize)]
pub struct ResumeDetail {
    pub record: ResumeRecord,
    pub resume: ResumeData,
    /// `resume.skills` as comma-separated editor text.
    pub skills_text: String,
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ResumeDetail>, AppError> {
    let record = get_resume(
        state.backend.as_ref(),
        state.config.tables.resumes,
        &user.user_id(),
        id,
    )
    .await?;
    let resume = record.resume_data()?;
    Ok(Json(ResumeDetail {
        skills_text: format_skills(&resume.skills),
        record,
        resume,
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete_resume(
        state.backend.as_ref(),
        state.config.tables.resumes,
        &user.user_id(),
        id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    /// Value to store in `personalInfo.profileImage`.
    pub profile_image: ProfileImage,
    pub url: String,
}

/// POST /api/v1/resumes/image
/// Multipart with a `file` part; returns the stored file reference.
pub async fn handle_upload_image(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, AppError> {
    let upload = read_upload(multipart, "file").await?;
    validate_image(&upload.file)?;

    let size = upload.file.bytes.len();
    let file_ref = state.backend.upload(upload.file).await?;
    info!(user_id = user.0.id, file_id = file_ref.0, size, "Stored resume image");

    Ok(Json(ImageUploadResponse {
        profile_image: ProfileImage::Stored(file_ref),
        url: state.backend.file_url(file_ref),
    }))
}
