//! Template catalog: the built-in list, merged with rows from the remote
//! templates table when it is reachable.

use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{BackendApi, BackendError, PageQuery, TableId};
use crate::models::template::RendererKind::{
    self, Basic as B, Modern as M, ModernYellow as MY, Professional as P,
};
use crate::models::template::TemplateCategory::{
    self, Basic as CatBasic, Creative as CatCreative, Modern as CatModern,
    Professional as CatProfessional, Simple as CatSimple,
};
use crate::models::template::{TemplateDescriptor, TemplateRow};

const REMOTE_PAGE_SIZE: u32 = 100;

/// Templates offered to the user, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDescriptor>,
}

type BuiltinEntry = (
    &'static str,
    &'static str,
    &'static str,
    TemplateCategory,
    RendererKind,
    bool,
    f32,
    u32,
    Option<&'static str>,
);

#[rustfmt::skip]
const BUILTIN: &[BuiltinEntry] = &[
    ("basic", "Basic", "Basic Clean", CatBasic, B, true, 4.8, 756, Some("A clean, straightforward template perfect for most job applications")),
    ("basic-plus", "Basic Plus", "Basic Plus", CatBasic, B, true, 4.7, 682, Some("An enhanced version of our basic template with slight design improvements")),
    ("basic-minimal", "Basic Minimal", "Basic Minimal", CatBasic, B, false, 4.6, 598, Some("A minimalist approach focusing purely on content")),
    ("modern", "Modern", "Modern Professional", CatModern, M, true, 4.9, 842, Some("A contemporary design with a professional look")),
    ("modern-bold", "Modern Bold", "Modern Bold", CatModern, M, true, 4.7, 723, Some("A striking modern design that makes a statement")),
    ("modern-minimal", "Modern Minimal", "Modern Minimal", CatModern, M, false, 4.8, 711, Some("A sleek, minimalist take on the modern template")),
    ("modern-yellow", "Modern Yellow", "Modern Yellow", CatModern, MY, true, 4.9, 785, Some("A bold modern template with striking yellow accents")),
    ("professional", "Professional", "Executive Elite", CatProfessional, P, true, 4.7, 784, Some("A sophisticated template ideal for executive positions")),
    ("professional-plus", "Professional Plus", "Professional Plus", CatProfessional, P, true, 4.9, 689, Some("An enhanced professional template with premium design elements")),
    ("professional-minimal", "Professional Minimal", "Professional Minimal", CatProfessional, P, false, 4.8, 675, Some("A refined, minimalist take on our professional template")),
    ("creative-basic", "Creative Basic", "Creative Basic", CatCreative, B, true, 4.6, 587, Some("A basic template with creative flair")),
    ("creative-modern", "Creative Modern", "Creative Modern", CatCreative, M, true, 4.7, 625, Some("A modern template with creative elements")),
    ("creative-pro", "Creative Professional", "Creative Professional", CatCreative, P, true, 4.5, 578, Some("A professional template with creative touches")),
    ("simple-basic", "Simple Basic", "Simple Basic", CatSimple, B, false, 4.5, 543, Some("An ultra-simple version of our basic template")),
    ("simple-modern", "Simple Modern", "Simple Modern", CatSimple, M, false, 4.6, 612, Some("A simplified version of our modern template")),
    ("simple-pro", "Simple Professional", "Simple Professional", CatSimple, P, false, 4.7, 645, Some("A simplified version of our professional template")),
    ("basic-classic", "Basic Classic", "Basic Classic", CatBasic, B, true, 4.5, 532, None),
    ("basic-formal", "Basic Formal", "Basic Formal", CatBasic, B, true, 4.4, 487, None),
    ("basic-standard", "Basic Standard", "Basic Standard", CatBasic, B, false, 4.3, 465, None),
    ("basic-entry", "Basic Entry", "Basic Entry", CatBasic, B, false, 4.2, 432, None),
    ("basic-student", "Basic Student", "Basic Student", CatBasic, B, true, 4.5, 512, None),
    ("modern-tech", "Modern Tech", "Modern Tech", CatModern, M, true, 4.8, 732, None),
    ("modern-creative", "Modern Creative", "Modern Creative", CatModern, M, true, 4.7, 687, None),
    ("modern-digital", "Modern Digital", "Modern Digital", CatModern, M, true, 4.6, 643, None),
    ("modern-elegant", "Modern Elegant", "Modern Elegant", CatModern, M, true, 4.9, 765, None),
    ("modern-clean", "Modern Clean", "Modern Clean", CatModern, M, false, 4.7, 712, None),
    ("professional-executive", "Professional Executive", "Professional Executive", CatProfessional, P, true, 4.8, 721, None),
    ("professional-corporate", "Professional Corporate", "Professional Corporate", CatProfessional, P, true, 4.7, 698, None),
    ("professional-business", "Professional Business", "Professional Business", CatProfessional, P, true, 4.6, 654, None),
    ("professional-formal", "Professional Formal", "Professional Formal", CatProfessional, P, false, 4.5, 623, None),
    ("professional-classic", "Professional Classic", "Professional Classic", CatProfessional, P, true, 4.8, 732, None),
    ("creative-colorful", "Creative Colorful", "Creative Colorful", CatCreative, M, true, 4.5, 587, None),
    ("creative-bold", "Creative Bold", "Creative Bold", CatCreative, M, true, 4.6, 612, None),
    ("creative-designer", "Creative Designer", "Creative Designer", CatCreative, P, true, 4.7, 654, None),
    ("creative-artist", "Creative Artist", "Creative Artist", CatCreative, M, true, 4.8, 678, None),
    ("creative-unique", "Creative Unique", "Creative Unique", CatCreative, B, true, 4.4, 532, None),
    ("simple-clean", "Simple Clean", "Simple Clean", CatSimple, B, false, 4.5, 567, None),
    ("simple-minimal", "Simple Minimal", "Simple Minimal", CatSimple, B, false, 4.6, 598, None),
    ("simple-elegant", "Simple Elegant", "Simple Elegant", CatSimple, M, false, 4.7, 623, None),
    ("simple-classic", "Simple Classic", "Simple Classic", CatSimple, B, false, 4.4, 543, None),
    ("simple-standard", "Simple Standard", "Simple Standard", CatSimple, B, false, 4.5, 576, None),
    ("modern-professional-plus", "Modern Professional Plus", "Modern Professional Plus", CatModern, M, true, 4.8, 721, None),
    ("basic-professional", "Basic Professional", "Basic Professional", CatBasic, B, true, 4.6, 654, None),
    ("professional-modern", "Professional Modern", "Professional Modern", CatProfessional, P, true, 4.7, 687, None),
    ("creative-premium", "Creative Premium", "Creative Premium", CatCreative, M, true, 4.9, 732, None),
    ("simple-premium", "Simple Premium", "Simple Premium", CatSimple, B, false, 4.8, 698, None),
    ("modern-deluxe", "Modern Deluxe", "Modern Deluxe", CatModern, M, true, 4.9, 765, None),
    ("professional-deluxe", "Professional Deluxe", "Professional Deluxe", CatProfessional, P, true, 4.8, 745, None),
    ("basic-deluxe", "Basic Deluxe", "Basic Deluxe", CatBasic, B, true, 4.7, 687, None),
    ("creative-deluxe", "Creative Deluxe", "Creative Deluxe", CatCreative, M, true, 4.8, 712, None),
    ("simple-deluxe", "Simple Deluxe", "Simple Deluxe", CatSimple, B, false, 4.6, 632, None),
];

/// Templates written to the remote table by `seed_templates`.
const SEEDED_IDS: &[&str] = &["modern-yellow"];

fn descriptor(entry: &BuiltinEntry) -> TemplateDescriptor {
    let (id, name, display_name, category, renderer, allow_image_upload, rating, downloads, description) =
        *entry;
    TemplateDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        display_name: display_name.to_string(),
        category,
        allow_image_upload,
        description: description.map(str::to_string),
        renderer,
        thumbnail: None,
        rating,
        downloads,
    }
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN.iter().map(descriptor).collect(),
        }
    }

    pub fn all(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    pub fn find(&self, id: &str) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates in `category`, or every template for `None`.
    pub fn by_category(&self, category: Option<TemplateCategory>) -> Vec<&TemplateDescriptor> {
        self.templates
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// Remote templates first, then the built-ins whose ids the remote list lacks.
    /// An empty remote list leaves the catalog unchanged.
    pub fn merge_remote(self, remote: Vec<TemplateDescriptor>) -> Self {
        if remote.is_empty() {
            return self;
        }
        let mut templates = remote;
        let remaining: Vec<_> = self
            .templates
            .into_iter()
            .filter(|t| !templates.iter().any(|r| r.id == t.id))
            .collect();
        templates.extend(remaining);
        Self { templates }
    }
}

/// Builds the catalog from the remote templates table.
/// Falls back to the built-in list when the remote call fails.
pub async fn load_catalog(backend: &dyn BackendApi, table: TableId) -> TemplateCatalog {
    match fetch_remote(backend, table).await {
        Ok(remote) => {
            info!(remote = remote.len(), "Loaded remote templates");
            TemplateCatalog::builtin().merge_remote(remote)
        }
        Err(e) => {
            warn!("Falling back to built-in templates: {e}");
            TemplateCatalog::builtin()
        }
    }
}

async fn fetch_remote(
    backend: &dyn BackendApi,
    table: TableId,
) -> Result<Vec<TemplateDescriptor>, BackendError> {
    let query = PageQuery::first_page(REMOTE_PAGE_SIZE).order_by("template_id", true);
    let page = backend.table_page(table, &query).await?;

    // A malformed row drops only itself, never the rest of the page.
    Ok(page
        .list
        .iter()
        .filter_map(|value| match serde_json::from_value::<TemplateRow>(value.clone()) {
            Ok(row) => {
                let id = row.template_id.clone();
                let descriptor = row.into_descriptor();
                if descriptor.is_none() {
                    warn!(template_id = %id, "Skipping remote template with unknown category or component");
                }
                descriptor
            }
            Err(e) => {
                warn!("Skipping undecodable remote template row: {e}");
                None
            }
        })
        .collect())
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
}

/// Upserts the seeded templates into the remote table, keyed by `template_id`.
pub async fn seed_templates(
    backend: &dyn BackendApi,
    table: TableId,
) -> Result<SeedReport, BackendError> {
    let builtin = TemplateCatalog::builtin();
    let mut report = SeedReport::default();

    for id in SEEDED_IDS {
        let Some(template) = builtin.find(id) else {
            continue;
        };
        let mut row = TemplateRow::from_descriptor(template);

        let query = PageQuery::first_page(1).filter_eq("template_id", *id);
        let existing: Option<TemplateRow> = backend.table_page(table, &query).await?.first()?;

        match existing.and_then(|r| r.id) {
            Some(row_id) => {
                row.id = Some(row_id);
                backend.table_update(table, serde_json::to_value(&row)?).await?;
                info!(template_id = %id, "Updated template row");
                report.updated.push(id.to_string());
            }
            None => {
                backend.table_create(table, serde_json::to_value(&row)?).await?;
                info!(template_id = %id, "Created template row");
                report.created.push(id.to_string());
            }
        }
    }

    Ok(report)
}
