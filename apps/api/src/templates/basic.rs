use crate::models::resume::ResumeData;
use crate::models::template::RendererKind;

use super::document::{Align, Block, ChipStyle, Document, RegionRole, Section, Theme};
use super::{contact_items, date_range, TemplateRenderer};

const THEME: Theme = Theme {
    text: "#000000",
    accent: "#000000",
    band: None,
    sidebar: None,
};

/// Single column: centred header, then summary, experience, education, skills.
pub struct BasicRenderer;

impl TemplateRenderer for BasicRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Basic
    }

    fn render(&self, data: &ResumeData, preview: bool) -> Document {
        let info = &data.personal_info;

        let header = Section::untitled(vec![
            Block::Title {
                text: info.name.to_uppercase(),
                align: Align::Center,
            },
            Block::Subtitle {
                text: info.title.clone(),
                align: Align::Center,
            },
            Block::ContactLine {
                items: contact_items(info),
                align: Align::Center,
            },
        ]);

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

        Document::new(self.kind(), preview, THEME).with_region(
            RegionRole::Main,
            100,
            vec![
                header,
                Section::titled(
                    "PROFESSIONAL SUMMARY",
                    vec![Block::Paragraph {
                        text: info.summary.clone(),
                        boxed: false,
                    }],
                ),
                Section::titled("EXPERIENCE", experience),
                Section::titled("EDUCATION", education),
                Section::titled(
                    "SKILLS",
                    vec![Block::Chips {
                        items: data.skills.clone(),
                        style: ChipStyle::Inline,
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
    fn test_single_full_width_region() {
        let doc = BasicRenderer.render(&sample_resume(), false);
        assert_eq!(doc.regions.len(), 1);
        assert_eq!(doc.regions[0].width_pct, 100);
    }

    #[test]
    fn test_name_is_uppercased_and_centered() {
        let doc = BasicRenderer.render(&sample_resume(), false);
        let title = doc.blocks().next().unwrap();
        assert_eq!(
            title,
            &Block::Title {
                text: "GRACE BREWSTER HOPPER".to_string(),
                align: Align::Center,
            }
        );
    }

    #[test]
    fn test_experience_keeps_entry_order() {
        let doc = BasicRenderer.render(&sample_resume(), false);
        let titles: Vec<_> = doc
            .blocks()
            .filter_map(|b| match b {
                Block::Entry { title, body: Some(_), .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Senior Mathematician", "Director"]);
    }
}
