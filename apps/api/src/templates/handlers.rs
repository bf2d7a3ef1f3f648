use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::models::template::{TemplateCategory, TemplateDescriptor};
use crate::state::AppState;
use crate::templates::catalog::{load_catalog, seed_templates, SeedReport};
use crate::templates::document::PageSize;
use crate::templates::export::{export_filename, ExportFormat};

#[derive(Deserialize)]
pub struct CategoryQuery {
    /// `all` or absent lists everything.
    pub category: Option<String>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<TemplateDescriptor>>, AppError> {
    let category = match params.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            TemplateCategory::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown template category '{raw}'")))?,
        ),
    };
    let catalog = state.catalog.read().await;
    Ok(Json(
        catalog.by_category(category).into_iter().cloned().collect(),
    ))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateDescriptor>, AppError> {
    let catalog = state.catalog.read().await;
    catalog
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))
}

#[derive(Deserialize)]
pub struct RenderRequest {
    pub template_id: String,
    pub resume: ResumeData,
    #[serde(default)]
    pub preview: bool,
}

/// POST /api/v1/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Html<String> {
    let catalog = state.catalog.read().await;
    let document = state
        .renderers
        .render_template(&catalog, &req.template_id, &req.resume, req.preview);
    Html(document.to_html(Some(state.backend.as_ref())))
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub template_id: String,
    pub resume: ResumeData,
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub filename: String,
    pub format: ExportFormat,
    pub mime_type: &'static str,
    pub page: PageSize,
    pub html: String,
}

/// POST /api/v1/render/export
/// Produces the full-size page for the rasterizer. One export per user at a time.
pub async fn handle_export(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let user_id = user.user_id();
    let _ticket = state.export_guard.acquire(&user_id)?;

    let catalog = state.catalog.read().await;
    let document = state
        .renderers
        .render_template(&catalog, &req.template_id, &req.resume, false);

    info!(
        user_id = %user_id,
        template_id = %req.template_id,
        format = req.format.extension(),
        "Prepared export document"
    );

    Ok(Json(ExportResponse {
        filename: export_filename(&req.resume.personal_info.name, req.format),
        format: req.format,
        mime_type: req.format.mime_type(),
        page: document.page,
        html: document.to_html(Some(state.backend.as_ref())),
    }))
}

/// POST /api/v1/templates/seed
/// Upserts the seeded templates remotely, then reloads the catalog.
pub async fn handle_seed_templates(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<SeedReport>, AppError> {
    let table = state.config.tables.templates;
    let report = seed_templates(state.backend.as_ref(), table).await?;

    let reloaded = load_catalog(state.backend.as_ref(), table).await;
    *state.catalog.write().await = reloaded;

    info!(
        user_id = user.0.id,
        created = report.created.len(),
        updated = report.updated.len(),
        "Seeded templates"
    );
    Ok(Json(report))
}
