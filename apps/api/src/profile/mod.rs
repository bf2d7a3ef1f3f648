//! User profile and activity counters.
//!
//! Both records are created lazily: the first read for a user inserts a blank
//! row and reads it back, so callers always get a row with its backend id.

pub mod handlers;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::backend::{BackendApi, BackendError, PageQuery, TableId, UploadFile};
use crate::errors::AppError;
use crate::models::user::{UserActivity, UserProfile};

async fn find_by_user<T: serde::de::DeserializeOwned>(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
) -> Result<Option<T>, BackendError> {
    let query = PageQuery::first_page(1).filter_eq("user_id", user_id);
    backend.table_page(table, &query).await?.first()
}

/// Loads the user's profile, creating it from `default_name` when missing.
pub async fn get_or_create_profile(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    default_name: &str,
) -> Result<UserProfile, AppError> {
    if let Some(profile) = find_by_user(backend, table, user_id).await? {
        return Ok(profile);
    }

    info!(user_id, "Creating profile");
    backend
        .table_create(
            table,
            json!({
                "user_id": user_id,
                "full_name": default_name,
                "job_title": "",
                "profile_image": "",
            }),
        )
        .await?;

    find_by_user(backend, table, user_id)
        .await?
        .ok_or(AppError::Backend(BackendError::EmptyData("profile")))
}

pub async fn get_or_create_activity(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
) -> Result<UserActivity, AppError> {
    if let Some(activity) = find_by_user(backend, table, user_id).await? {
        return Ok(activity);
    }

    info!(user_id, "Creating activity record");
    backend
        .table_create(
            table,
            json!({
                "user_id": user_id,
                "resume_count": 0,
                "ats_check_count": 0,
                "last_active": Utc::now().to_rfc3339(),
            }),
        )
        .await?;

    find_by_user(backend, table, user_id)
        .await?
        .ok_or(AppError::Backend(BackendError::EmptyData("activity")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCounter {
    Resumes,
    AtsChecks,
}

/// Increments one counter and stamps `last_active`.
pub async fn bump_activity(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    counter: ActivityCounter,
) -> Result<UserActivity, AppError> {
    let mut activity = get_or_create_activity(backend, table, user_id).await?;
    match counter {
        ActivityCounter::Resumes => activity.resume_count += 1,
        ActivityCounter::AtsChecks => activity.ats_check_count += 1,
    }
    activity.last_active = Utc::now().to_rfc3339();

    backend
        .table_update(table, serde_json::to_value(&activity)?)
        .await?;
    Ok(activity)
}

pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub profile_image: Option<String>,
}

pub async fn update_profile(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    changes: ProfileChanges,
) -> Result<UserProfile, AppError> {
    let mut profile: UserProfile = find_by_user(backend, table, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))?;

    if let Some(full_name) = changes.full_name {
        profile.full_name = full_name;
    }
    if let Some(job_title) = changes.job_title {
        profile.job_title = job_title;
    }
    if let Some(profile_image) = changes.profile_image {
        profile.profile_image = profile_image;
    }

    backend
        .table_update(table, serde_json::to_value(&profile)?)
        .await?;
    Ok(profile)
}

/// Stores a new profile picture and points the profile at it.
pub async fn replace_profile_image(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    file: UploadFile,
) -> Result<UserProfile, AppError> {
    let file_ref = backend.upload(file).await?;
    update_profile(
        backend,
        table,
        user_id,
        ProfileChanges {
            full_name: None,
            job_title: None,
            profile_image: Some(file_ref.to_string()),
        },
    )
    .await
}
