use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::user::{UserActivity, UserProfile};
use crate::profile::{
    get_or_create_activity, get_or_create_profile, replace_profile_image, update_profile,
    ProfileChanges,
};
use crate::state::AppState;
use crate::uploads::{read_upload, validate_image};

#[derive(Deserialize)]
pub struct ProfileQuery {
    /// Used as `full_name` when the profile has to be created.
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub activity: UserActivity,
    /// Download URL of the stored profile image, if any.
    pub image_url: Option<String>,
}

fn image_url(state: &AppState, profile: &UserProfile) -> Option<String> {
    profile
        .profile_image
        .trim()
        .parse::<i64>()
        .ok()
        .map(|id| state.backend.file_url(crate::backend::FileRef(id)))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let backend = state.backend.as_ref();
    let tables = &state.config.tables;
    let user_id = user.user_id();
    let default_name = if params.name.trim().is_empty() {
        user.0.name.as_str()
    } else {
        params.name.as_str()
    };

    let profile =
        get_or_create_profile(backend, tables.profiles, &user_id, default_name).await?;
    let activity = get_or_create_activity(backend, tables.activity, &user_id).await?;

    Ok(Json(ProfileResponse {
        image_url: image_url(&state, &profile),
        profile,
        activity,
    }))
}

#[derive(Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = update_profile(
        state.backend.as_ref(),
        state.config.tables.profiles,
        &user.user_id(),
        ProfileChanges {
            full_name: req.full_name,
            job_title: req.job_title,
            profile_image: None,
        },
    )
    .await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile/image
/// Multipart with a `file` image part.
pub async fn handle_upload_profile_image(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    let upload = read_upload(multipart, "file").await?;
    validate_image(&upload.file)?;

    let profile = replace_profile_image(
        state.backend.as_ref(),
        state.config.tables.profiles,
        &user.user_id(),
        upload.file,
    )
    .await?;
    Ok(Json(profile))
}
