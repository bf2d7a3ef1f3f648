use crate::models::resume::ResumeData;
use crate::models::template::RendererKind;

use super::document::{Align, Block, ChipStyle, Document, RegionRole, Section, Theme};
use super::{contact_items, date_range, TemplateRenderer};

const THEME: Theme = Theme {
    text: "#000000",
    accent: "#2563eb",
    band: Some("#2563eb"),
    sidebar: None,
};

/// Coloured header band over a two-column body; skills sit in the narrow column.
pub struct ModernRenderer;

impl TemplateRenderer for ModernRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Modern
    }

    fn render(&self, data: &ResumeData, preview: bool) -> Document {
        let info = &data.personal_info;

        let band = vec![Section::untitled(vec![
            Block::Title {
                text: info.name.clone(),
                align: Align::Left,
            },
            Block::Subtitle {
                text: info.title.clone(),
                align: Align::Left,
            },
            Block::ContactLine {
                items: contact_items(info),
                align: Align::Left,
            },
        ])];

        let summary = vec![Section::titled(
            "PROFESSIONAL SUMMARY",
            vec![Block::Paragraph {
                text: info.summary.clone(),
                boxed: false,
            }],
        )];

        let experience = data
            .experience
            .iter()
            .map(|exp| Block::Entry {
                title: exp.position.clone(),
                subtitle: exp.company.clone(),
                dates: date_range(&exp.start_date, &exp.end_date),
                body: Some(exp.description.clone()),
                timeline: false,
            })
            .collect();

        let education = data
            .education
            .iter()
            .map(|edu| Block::Entry {
                title: edu.school.clone(),
                subtitle: edu.degree.clone(),
                dates: edu.date.clone(),
                body: None,
                timeline: false,
            })
            .collect();

        Document::new(self.kind(), preview, THEME)
            .with_region(RegionRole::Band, 100, band)
            .with_region(RegionRole::Header, 100, summary)
            .with_region(
                RegionRole::Main,
                66,
                vec![
                    Section::titled("EXPERIENCE", experience),
                    Section::titled("EDUCATION", education),
                ],
            )
            .with_region(
                RegionRole::Side,
                34,
                vec![Section::titled(
                    "SKILLS",
                    vec![Block::Chips {
                        items: data.skills.clone(),
                        style: ChipStyle::Stacked,
                    }],
                )],
            )
    }
}
