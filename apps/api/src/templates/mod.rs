// Template catalog and renderers.
// Every renderer takes the same `ResumeData` by shared reference and returns a
// `Document`; layouts differ only in arrangement, colour and optional fields.

pub mod basic;
pub mod catalog;
pub mod document;
pub mod export;
pub mod handlers;
pub mod modern;
pub mod modern_yellow;
pub mod professional;

use std::collections::HashMap;

use crate::models::resume::{PersonalInfo, ResumeData};
use crate::models::template::RendererKind;

pub use catalog::TemplateCatalog;
pub use document::Document;

/// A visual layout. Must be pure: same input, same `Document`.
pub trait TemplateRenderer: Send + Sync {
    fn kind(&self) -> RendererKind;

    fn render(&self, data: &ResumeData, preview: bool) -> Document;
}

/// Maps a renderer kind to its implementation.
pub struct RendererRegistry {
    renderers: HashMap<RendererKind, Box<dyn TemplateRenderer>>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry holding the four built-in layouts.
    pub fn with_builtin() -> Self {
        Self::empty()
            .register(Box::new(basic::BasicRenderer))
            .register(Box::new(modern::ModernRenderer))
            .register(Box::new(professional::ProfessionalRenderer))
            .register(Box::new(modern_yellow::ModernYellowRenderer))
    }

    pub fn register(mut self, renderer: Box<dyn TemplateRenderer>) -> Self {
        self.renderers.insert(renderer.kind(), renderer);
        self
    }

    pub fn get(&self, kind: RendererKind) -> Option<&dyn TemplateRenderer> {
        self.renderers.get(&kind).map(|r| r.as_ref())
    }

    /// Renders `data` with the layout behind `template_id`.
    /// Unknown ids, or kinds missing from the registry, fall back to the basic layout.
    pub fn render_template(
        &self,
        catalog: &TemplateCatalog,
        template_id: &str,
        data: &ResumeData,
        preview: bool,
    ) -> Document {
        let kind = catalog
            .find(template_id)
            .map(|t| t.renderer)
            .unwrap_or(RendererKind::Basic);

        match self.get(kind).or_else(|| self.get(RendererKind::Basic)) {
            Some(renderer) => renderer.render(data, preview),
            None => basic::BasicRenderer.render(data, preview),
        }
    }
}

/// `Some(trimmed)` for non-blank optional text.
pub(crate) fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Email, phone and (when present) address, in display order.
pub(crate) fn contact_items(info: &PersonalInfo) -> Vec<String> {
    let mut items = vec![info.email.clone(), info.phone.clone()];
    if let Some(address) = non_blank(info.address.as_ref()) {
        items.push(address);
    }
    items
}

pub(crate) fn date_range(start: &str, end: &str) -> String {
    format!("{start} - {end}")
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::resume::{Education, Experience, PersonalInfo, ResumeData};

    pub fn sample_resume() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "Grace Brewster Hopper".to_string(),
                email: "grace@navy.mil".to_string(),
                phone: "(555) 010-1906".to_string(),
                address: Some("Arlington, VA".to_string()),
                title: "Rear Admiral".to_string(),
                summary: "Compiler pioneer & COBOL co-designer.".to_string(),
                profile_image: None,
            },
            experience: vec![
                Experience {
                    id: "exp-a".to_string(),
                    company: "Remington Rand".to_string(),
                    position: "Senior Mathematician".to_string(),
                    start_date: "1949".to_string(),
                    end_date: "1967".to_string(),
                    description: "Built the A-0 compiler.".to_string(),
                    location: None,
                },
                Experience {
                    id: "exp-b".to_string(),
                    company: "US Navy".to_string(),
                    position: "Director".to_string(),
                    start_date: "1967".to_string(),
                    end_date: "1986".to_string(),
                    description: "Standardised programming languages.".to_string(),
                    location: Some("Washington, DC".to_string()),
                },
            ],
            education: vec![Education {
                id: "edu-a".to_string(),
                school: "Yale University".to_string(),
                degree: "PhD Mathematics".to_string(),
                date: "1934".to_string(),
            }],
            skills: vec!["COBOL".to_string(), "FLOW-MATIC".to_string()],
        }
    }

    pub fn without_optionals(mut data: ResumeData) -> ResumeData {
        data.personal_info.address = None;
        data.personal_info.profile_image = None;
        data
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{sample_resume, without_optionals};
    use super::*;
    use crate::models::template::RendererKind;

    const ALL_KINDS: [RendererKind; 4] = [
        RendererKind::Basic,
        RendererKind::Modern,
        RendererKind::Professional,
        RendererKind::ModernYellow,
    ];

    #[test]
    fn test_builtin_registry_covers_every_kind() {
        let registry = RendererRegistry::with_builtin();
        for kind in ALL_KINDS {
            assert_eq!(registry.get(kind).map(|r| r.kind()), Some(kind));
        }
    }

    #[test]
    fn test_render_is_pure_for_every_renderer() {
        let registry = RendererRegistry::with_builtin();
        let data = sample_resume();
        let before = data.clone();
        for kind in ALL_KINDS {
            let renderer = registry.get(kind).unwrap();
            for preview in [true, false] {
                let first = renderer.render(&data, preview);
                let second = renderer.render(&data, preview);
                assert_eq!(first, second);
                assert_eq!(first.to_html(None), second.to_html(None));
            }
        }
        assert_eq!(data, before);
    }

    #[test]
    fn test_missing_optional_fields_are_omitted() {
        let registry = RendererRegistry::with_builtin();
        let data = without_optionals(sample_resume());
        for kind in ALL_KINDS {
            let html = registry.get(kind).unwrap().render(&data, false).to_html(None);
            assert!(!html.contains("Arlington"), "{kind:?} leaked an address");
            assert!(!html.contains("<img"), "{kind:?} rendered an image");
            assert!(html.contains("Yale University"));
        }
    }

    #[test]
    fn test_unknown_template_falls_back_to_basic() {
        let registry = RendererRegistry::with_builtin();
        let catalog = TemplateCatalog::builtin();
        let doc = registry.render_template(&catalog, "does-not-exist", &sample_resume(), false);
        assert_eq!(doc.renderer, RendererKind::Basic);
    }

    #[test]
    fn test_variant_template_resolves_to_its_renderer() {
        let registry = RendererRegistry::with_builtin();
        let catalog = TemplateCatalog::builtin();
        let doc = registry.render_template(&catalog, "creative-designer", &sample_resume(), true);
        assert_eq!(doc.renderer, RendererKind::Professional);
        assert!(doc.preview);
    }

    #[test]
    fn test_empty_registry_still_renders() {
        let registry = RendererRegistry::empty();
        let doc = registry.render_template(
            &TemplateCatalog::builtin(),
            "modern",
            &sample_resume(),
            false,
        );
        assert_eq!(doc.renderer, RendererKind::Basic);
    }

    #[test]
    fn test_contact_items_skip_blank_address() {
        let mut info = sample_resume().personal_info;
        info.address = Some("   ".to_string());
        assert_eq!(contact_items(&info).len(), 2);
    }
}
