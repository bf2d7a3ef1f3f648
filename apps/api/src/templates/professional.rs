use crate::models::resume::ResumeData;
use crate::models::template::RendererKind;

use super::document::{Align, Block, ChipStyle, Document, RegionRole, Section, Theme};
use super::{contact_items, date_range, TemplateRenderer};

const THEME: Theme = Theme {
    text: "#374151",
    accent: "#1f2937",
    band: None,
    sidebar: None,
};

/// Formal layout: name on the left, contact block right-aligned, summary boxed
/// between rules.
pub struct ProfessionalRenderer;

impl TemplateRenderer for ProfessionalRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Professional
    }

    fn render(&self, data: &ResumeData, preview: bool) -> Document {
        let info = &data.personal_info;

        let name_block = vec![Section::untitled(vec![
            Block::Title {
                text: info.name.clone(),
                align: Align::Left,
            },
            Block::Subtitle {
                text: info.title.clone(),
                align: Align::Left,
            },
        ])];

        let contact_block = vec![Section::untitled(vec![Block::ContactList {
            items: contact_items(info),
            align: Align::Right,
            bulleted: false,
        }])];

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
            .with_region(RegionRole::Header, 60, name_block)
            .with_region(RegionRole::Header, 40, contact_block)
            .with_region(
                RegionRole::Main,
                100,
                vec![
                    Section::untitled(vec![Block::Paragraph {
                        text: info.summary.clone(),
                        boxed: true,
                    }]),
                    Section::titled("Professional Experience", experience),
                    Section::titled("Education", education),
                    Section::titled(
                        "Skills",
                        vec![Block::Chips {
                            items: data.skills.clone(),
                            style: ChipStyle::Grid,
                        }],
                    ),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::sample_resume;

    #[test]
    fn test_contact_block_is_right_aligned() {
        let doc = ProfessionalRenderer.render(&sample_resume(), false);
        let contact = doc
            .blocks()
            .find(|b| matches!(b, Block::ContactList { .. }))
            .unwrap();
        match contact {
            Block::ContactList { items, align, .. } => {
                assert_eq!(*align, Align::Right);
                assert_eq!(items.last().map(String::as_str), Some("Arlington, VA"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_summary_is_boxed() {
        let doc = ProfessionalRenderer.render(&sample_resume(), false);
        assert!(doc
            .blocks()
            .any(|b| matches!(b, Block::Paragraph { boxed: true, .. })));
    }
}
