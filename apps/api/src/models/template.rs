use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Professional,
    Modern,
    Basic,
    Creative,
    Simple,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        TemplateCategory::Professional,
        TemplateCategory::Modern,
        TemplateCategory::Basic,
        TemplateCategory::Creative,
        TemplateCategory::Simple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Professional => "professional",
            TemplateCategory::Modern => "modern",
            TemplateCategory::Basic => "basic",
            TemplateCategory::Creative => "creative",
            TemplateCategory::Simple => "simple",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

/// Which renderer implementation draws a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererKind {
    #[serde(rename = "BasicTemplate")]
    Basic,
    #[serde(rename = "ModernTemplate")]
    Modern,
    #[serde(rename = "ProfessionalTemplate")]
    Professional,
    #[serde(rename = "ModernYellowTemplate")]
    ModernYellow,
}

impl RendererKind {
    pub fn component_name(&self) -> &'static str {
        match self {
            RendererKind::Basic => "BasicTemplate",
            RendererKind::Modern => "ModernTemplate",
            RendererKind::Professional => "ProfessionalTemplate",
            RendererKind::ModernYellow => "ModernYellowTemplate",
        }
    }

    pub fn from_component(name: &str) -> Option<Self> {
        [
            RendererKind::Basic,
            RendererKind::Modern,
            RendererKind::Professional,
            RendererKind::ModernYellow,
        ]
        .into_iter()
        .find(|k| k.component_name() == name)
    }
}

/// Metadata about a selectable template. Never mutated by users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub category: TemplateCategory,
    pub allow_image_upload: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub renderer: RendererKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub rating: f32,
    pub downloads: u32,
}

/// Template row as stored in the remote templates table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub template_id: String,
    pub template_name: String,
    pub template_display_name: String,
    #[serde(default)]
    pub template_description: Option<String>,
    pub template_category: String,
    pub template_component: String,
    #[serde(default)]
    pub template_thumbnail: Option<String>,
    pub allow_image_upload: bool,
    pub rating: f32,
    pub downloads: u32,
}

impl TemplateRow {
    /// Converts a remote row, or `None` when its category or component is unknown.
    pub fn into_descriptor(self) -> Option<TemplateDescriptor> {
        let category = TemplateCategory::parse(&self.template_category)?;
        let renderer = RendererKind::from_component(&self.template_component)?;
        Some(TemplateDescriptor {
            id: self.template_id,
            name: self.template_name,
            display_name: self.template_display_name,
            category,
            allow_image_upload: self.allow_image_upload,
            description: non_empty(self.template_description),
            renderer,
            thumbnail: non_empty(self.template_thumbnail),
            rating: self.rating,
            downloads: self.downloads,
        })
    }

    pub fn from_descriptor(descriptor: &TemplateDescriptor) -> Self {
        Self {
            id: None,
            template_id: descriptor.id.clone(),
            template_name: descriptor.name.clone(),
            template_display_name: descriptor.display_name.clone(),
            template_description: descriptor.description.clone(),
            template_category: descriptor.category.as_str().to_string(),
            template_component: descriptor.renderer.component_name().to_string(),
            template_thumbnail: descriptor.thumbnail.clone(),
            allow_image_upload: descriptor.allow_image_upload,
            rating: descriptor.rating,
            downloads: descriptor.downloads,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
