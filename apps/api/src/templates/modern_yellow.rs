use crate::models::resume::{PersonalInfo, ResumeData};
use crate::models::template::RendererKind;

use super::document::{Align, Block, Document, RegionRole, Section, Theme};
use super::{date_range, non_blank, TemplateRenderer};

const THEME: Theme = Theme {
    text: "#1f2937",
    accent: "#facc15",
    band: None,
    sidebar: Some("#1f2937"),
};

const TOP_SKILL_PCT: u8 = 85;
const SKILL_STEP_PCT: u8 = 5;

/// Dark sidebar with photo and contact details, yellow accents, skill bars.
pub struct ModernYellowRenderer;

impl TemplateRenderer for ModernYellowRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::ModernYellow
    }

    fn render(&self, data: &ResumeData, preview: bool) -> Document {
        let info = &data.personal_info;

        let mut sidebar = vec![Section::untitled(vec![avatar(info)])];

        sidebar.push(Section::titled(
            "CONTACT ME",
            vec![Block::ContactList {
                items: contact_me(info),
                align: Align::Left,
                bulleted: true,
            }],
        ));
        sidebar.push(Section::titled(
            "REFERENCES",
            vec![Block::Note {
                title: "Professional Reference".to_string(),
                text: "Reference available upon request".to_string(),
            }],
        ));
        sidebar.push(Section::titled(
            "EDUCATION",
            data.education
                .iter()
                .map(|edu| Block::Entry {
                    title: edu.school.clone(),
                    subtitle: edu.degree.clone(),
                    dates: edu.date.clone(),
                    body: None,
                    timeline: false,
                })
                .collect(),
        ));

        let (first, last) = split_name(&info.name);
        let heading = Section::untitled(vec![
            Block::SplitName { first, last },
            Block::Subtitle {
                text: info.title.to_uppercase(),
                align: Align::Left,
            },
        ]);

        let experience = data
            .experience
            .iter()
            .map(|exp| {
                let location = non_blank(exp.location.as_ref()).unwrap_or_else(|| "Remote".to_string());
                Block::Entry {
                    title: exp.position.clone(),
                    subtitle: format!("{} / {}", exp.company, location),
                    dates: date_range(&exp.start_date, &exp.end_date),
                    body: Some(exp.description.clone()),
                    timeline: true,
                }
            })
            .collect();

        Document::new(self.kind(), preview, THEME)
            .with_region(RegionRole::Sidebar, 35, sidebar)
            .with_region(
                RegionRole::Main,
                65,
                vec![
                    heading,
                    Section::titled(
                        "ABOUT ME",
                        vec![Block::Paragraph {
                            text: info.summary.clone(),
                            boxed: false,
                        }],
                    ),
                    Section::titled("JOB EXPERIENCE", experience),
                    Section::titled(
                        "SKILLS",
                        vec![Block::SkillBars {
                            items: skill_levels(&data.skills),
                        }],
                    ),
                ],
            )
    }
}

fn avatar(info: &PersonalInfo) -> Block {
    match &info.profile_image {
        Some(image) => Block::Image {
            image: image.clone(),
            alt: info.name.clone(),
        },
        None => Block::Initial {
            letter: info
                .name
                .trim()
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
        },
    }
}

fn contact_me(info: &PersonalInfo) -> Vec<String> {
    [
        non_blank(Some(&info.phone)),
        non_blank(Some(&info.email)),
        non_blank(info.address.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// All words but the last, and the last word. A single word lands in `last`.
fn split_name(name: &str) -> (String, String) {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    let last = words.pop().unwrap_or_default().to_string();
    (words.join(" "), last)
}

fn skill_levels(skills: &[String]) -> Vec<(String, u8)> {
    skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let step = u8::try_from(i).unwrap_or(u8::MAX).saturating_mul(SKILL_STEP_PCT);
            (skill.clone(), TOP_SKILL_PCT.saturating_sub(step))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FileRef;
    use crate::models::resume::ProfileImage;
    use crate::templates::test_support::sample_resume;

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Grace Brewster Hopper"),
            ("Grace Brewster".to_string(), "Hopper".to_string())
        );
        assert_eq!(split_name("Cher"), (String::new(), "Cher".to_string()));
        assert_eq!(split_name("  "), (String::new(), String::new()));
    }

    #[test]
    fn test_skill_bars_step_down_and_saturate() {
        let skills: Vec<String> = (0..20).map(|i| format!("s{i}")).collect();
        let levels = skill_levels(&skills);
        assert_eq!(levels[0].1, 85);
        assert_eq!(levels[1].1, 80);
        assert_eq!(levels[16].1, 5);
        assert_eq!(levels[17].1, 0);
        assert_eq!(levels[19].1, 0);
    }

    #[test]
    fn test_initial_fallback_without_image() {
        let doc = ModernYellowRenderer.render(&sample_resume(), false);
        assert!(doc
            .blocks()
            .any(|b| b == &Block::Initial { letter: "G".to_string() }));
        assert!(!doc.to_html(None).contains("<img"));
    }

    #[test]
    fn test_inline_image_is_rendered() {
        let mut data = sample_resume();
        data.personal_info.profile_image =
            Some(ProfileImage::Inline("data:image/png;base64,AAAA".to_string()));
        let html = ModernYellowRenderer.render(&data, false).to_html(None);
        assert!(html.contains("<img class=\"avatar\" src=\"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn test_stored_image_becomes_image_block() {
        let mut data = sample_resume();
        data.personal_info.profile_image = Some(ProfileImage::Stored(FileRef(9)));
        let doc = ModernYellowRenderer.render(&data, true);
        assert!(doc.blocks().any(|b| matches!(b, Block::Image { .. })));
    }

    #[test]
    fn test_experience_location_defaults_to_remote() {
        let doc = ModernYellowRenderer.render(&sample_resume(), false);
        let subtitles: Vec<_> = doc
            .blocks()
            .filter_map(|b| match b {
                Block::Entry {
                    subtitle,
                    timeline: true,
                    ..
                } => Some(subtitle.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            subtitles,
            vec!["Remington Rand / Remote", "US Navy / Washington, DC"]
        );
    }

    #[test]
    fn test_sidebar_and_main_widths() {
        let doc = ModernYellowRenderer.render(&sample_resume(), false);
        assert_eq!(doc.regions[0].role, RegionRole::Sidebar);
        assert_eq!(doc.regions[0].width_pct, 35);
        assert_eq!(doc.regions[1].width_pct, 65);
    }
}
