pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::auth::handlers as auth;
use crate::profile::handlers as profile;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::templates::handlers as templates;

/// Largest request body accepted; leaves headroom over the 10MB PDF cap.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/reset-request", post(auth::handle_reset_request))
        .route("/api/v1/auth/reset", post(auth::handle_reset_password))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).patch(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/image",
            post(profile::handle_upload_profile_image),
        )
        // Resume builder
        .route(
            "/api/v1/resumes",
            get(resume::handle_list).post(resume::handle_save),
        )
        .route("/api/v1/resumes/default", get(resume::handle_default_resume))
        .route("/api/v1/resumes/edit", post(resume::handle_edit))
        .route("/api/v1/resumes/image", post(resume::handle_upload_image))
        .route(
            "/api/v1/resumes/:id",
            get(resume::handle_get).delete(resume::handle_delete),
        )
        // Templates and rendering
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/templates/seed", post(templates::handle_seed_templates))
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        .route("/api/v1/render", post(templates::handle_render))
        .route("/api/v1/render/export", post(templates::handle_export))
        // ATS checker
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/sample", get(ats::handle_sample))
        .route("/api/v1/ats/extract", post(ats::handle_extract))
        .route(
            "/api/v1/ats/checks",
            get(ats::handle_list_checks).post(ats::handle_create_check),
        )
        .route("/api/v1/ats/checks/:id", delete(ats::handle_delete_check))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
