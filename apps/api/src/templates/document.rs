//! Fixed-layout document produced by every renderer, plus its HTML serialization.
//!
//! A `Document` is plain data: regions (header band, columns, sidebar) holding
//! titled sections of blocks. `to_html` writes a standalone page sized to US
//! letter, which the export path hands to an external rasterizer unchanged.

use std::fmt::Write;

use serde::Serialize;

use crate::backend::BackendApi;
use crate::models::resume::ProfileImage;
use crate::models::template::RendererKind;

/// Physical page, in CSS pixels at 96 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width_px: u32,
    pub height_px: u32,
}

/// US letter, 8.5" x 11".
pub const LETTER: PageSize = PageSize {
    width_px: 816,
    height_px: 1056,
};

pub const PREVIEW_SCALE: f32 = 0.4;
pub const PREVIEW_FONT_PX: u8 = 16;
pub const FULL_FONT_PX: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRole {
    Header,
    Band,
    Main,
    Side,
    Sidebar,
}

impl RegionRole {
    fn class(&self) -> &'static str {
        match self {
            RegionRole::Header => "header",
            RegionRole::Band => "band",
            RegionRole::Main => "main",
            RegionRole::Side => "side",
            RegionRole::Sidebar => "sidebar",
        }
    }
}

/// Colour scheme of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub text: &'static str,
    pub accent: &'static str,
    pub band: Option<&'static str>,
    pub sidebar: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipStyle {
    /// Wrapped row of small tags.
    Inline,
    /// One per line.
    Stacked,
    /// Bordered cells in a grid.
    Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
        align: Align,
    },
    /// Name with the last word highlighted in the accent colour.
    SplitName {
        first: String,
        last: String,
    },
    Subtitle {
        text: String,
        align: Align,
    },
    /// Contact items on one line joined by `|`.
    ContactLine {
        items: Vec<String>,
        align: Align,
    },
    /// Contact items stacked one per line.
    ContactList {
        items: Vec<String>,
        align: Align,
        bulleted: bool,
    },
    Paragraph {
        text: String,
        boxed: bool,
    },
    Entry {
        title: String,
        subtitle: String,
        dates: String,
        body: Option<String>,
        timeline: bool,
    },
    Chips {
        items: Vec<String>,
        style: ChipStyle,
    },
    SkillBars {
        items: Vec<(String, u8)>,
    },
    Image {
        image: ProfileImage,
        alt: String,
    },
    /// Placeholder badge showing the first letter of the name.
    Initial {
        letter: String,
    },
    Note {
        title: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn untitled(blocks: Vec<Block>) -> Self {
        Self {
            heading: None,
            blocks,
        }
    }

    pub fn titled(heading: &str, blocks: Vec<Block>) -> Self {
        Self {
            heading: Some(heading.to_string()),
            blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub role: RegionRole,
    /// Share of the page width, in percent.
    pub width_pct: u8,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub renderer: RendererKind,
    pub preview: bool,
    pub scale: f32,
    pub font_size_px: u8,
    pub page: PageSize,
    pub theme: Theme,
    pub regions: Vec<Region>,
}

impl Document {
    pub fn new(renderer: RendererKind, preview: bool, theme: Theme) -> Self {
        Self {
            renderer,
            preview,
            scale: if preview { PREVIEW_SCALE } else { 1.0 },
            font_size_px: if preview { PREVIEW_FONT_PX } else { FULL_FONT_PX },
            page: LETTER,
            theme,
            regions: Vec::new(),
        }
    }

    pub fn with_region(mut self, role: RegionRole, width_pct: u8, sections: Vec<Section>) -> Self {
        self.regions.push(Region {
            role,
            width_pct,
            sections,
        });
        self
    }

    /// All blocks in reading order.
    #[cfg(test)]
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.regions
            .iter()
            .flat_map(|r| r.sections.iter())
            .flat_map(|s| s.blocks.iter())
    }

    /// Serializes the document as a standalone HTML page.
    ///
    /// Stored profile images resolve through `backend`; without one they are omitted.
    pub fn to_html(&self, backend: Option<&dyn BackendApi>) -> String {
        let mut out = String::with_capacity(4096);
        let theme = &self.theme;

        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><style>\
             body{{margin:0}}\
             .page{{width:{w}px;min-height:{h}px;font-size:{fs}px;color:{text};background:#fff;\
             font-family:sans-serif;transform:scale({scale});transform-origin:top left;display:flex;flex-wrap:wrap}}\
             .region{{box-sizing:border-box;padding:24px}}\
             .band{{background:{band};color:#fff}}\
             .sidebar{{background:{sidebar};color:#fff}}\
             h2{{color:{accent}}}\
             .accent{{color:{accent}}}\
             </style></head><body>\n",
            w = self.page.width_px,
            h = self.page.height_px,
            fs = self.font_size_px,
            text = theme.text,
            scale = self.scale,
            band = theme.band.unwrap_or(theme.accent),
            sidebar = theme.sidebar.unwrap_or(theme.accent),
            accent = theme.accent,
        );
        let _ = writeln!(
            out,
            "<div class=\"page renderer-{}\">",
            self.renderer.component_name()
        );

        for region in &self.regions {
            let _ = writeln!(
                out,
                "<div class=\"region {}\" style=\"width:{}%\">",
                region.role.class(),
                region.width_pct
            );
            for section in &region.sections {
                out.push_str("<section>");
                if let Some(heading) = &section.heading {
                    let _ = write!(out, "<h2>{}</h2>", escape(heading));
                }
                for block in &section.blocks {
                    write_block(&mut out, block, backend);
                }
                out.push_str("</section>\n");
            }
            out.push_str("</div>\n");
        }

        out.push_str("</div>\n</body></html>\n");
        out
    }
}

fn align_style(align: Align) -> &'static str {
    match align {
        Align::Left => "text-align:left",
        Align::Center => "text-align:center",
        Align::Right => "text-align:right",
    }
}

fn write_block(out: &mut String, block: &Block, backend: Option<&dyn BackendApi>) {
    match block {
        Block::Title { text, align } => {
            let _ = write!(out, "<h1 style=\"{}\">{}</h1>", align_style(*align), escape(text));
        }
        Block::SplitName { first, last } => {
            let _ = write!(
                out,
                "<h1>{} <span class=\"accent\">{}</span></h1>",
                escape(first),
                escape(last)
            );
        }
        Block::Subtitle { text, align } => {
            let _ = write!(
                out,
                "<p class=\"subtitle\" style=\"{}\">{}</p>",
                align_style(*align),
                escape(text)
            );
        }
        Block::ContactLine { items, align } => {
            let joined = items
                .iter()
                .map(|i| format!("<span>{}</span>", escape(i)))
                .collect::<Vec<_>>()
                .join("<span> | </span>");
            let _ = write!(
                out,
                "<div class=\"contact\" style=\"{}\">{}</div>",
                align_style(*align),
                joined
            );
        }
        Block::ContactList {
            items,
            align,
            bulleted,
        } => {
            let _ = write!(out, "<ul class=\"contact\" style=\"{}\">", align_style(*align));
            for item in items {
                if *bulleted {
                    let _ = write!(out, "<li><span class=\"accent\">&bull;</span> {}</li>", escape(item));
                } else {
                    let _ = write!(out, "<li>{}</li>", escape(item));
                }
            }
            out.push_str("</ul>");
        }
        Block::Paragraph { text, boxed } => {
            let class = if *boxed { "summary boxed" } else { "summary" };
            let _ = write!(out, "<p class=\"{}\">{}</p>", class, escape(text));
        }
        Block::Entry {
            title,
            subtitle,
            dates,
            body,
            timeline,
        } => {
            let class = if *timeline { "entry timeline" } else { "entry" };
            let _ = write!(
                out,
                "<div class=\"{}\"><h3>{}</h3><span class=\"dates\">{}</span><p class=\"org\">{}</p>",
                class,
                escape(title),
                escape(dates),
                escape(subtitle)
            );
            if let Some(body) = body {
                let _ = write!(out, "<p>{}</p>", escape(body));
            }
            out.push_str("</div>");
        }
        Block::Chips { items, style } => {
            let class = match style {
                ChipStyle::Inline => "chips inline",
                ChipStyle::Stacked => "chips stacked",
                ChipStyle::Grid => "chips grid",
            };
            let _ = write!(out, "<div class=\"{class}\">");
            for item in items {
                let _ = write!(out, "<span class=\"chip\">{}</span>", escape(item));
            }
            out.push_str("</div>");
        }
        Block::SkillBars { items } => {
            out.push_str("<div class=\"skill-bars\">");
            for (label, pct) in items {
                let _ = write!(
                    out,
                    "<div class=\"skill\"><span>{}</span><div class=\"bar\"><div class=\"fill\" style=\"width:{}%\"></div></div></div>",
                    escape(label),
                    pct
                );
            }
            out.push_str("</div>");
        }
        Block::Image { image, alt } => {
            if let Some(src) = image.src(backend) {
                let _ = write!(
                    out,
                    "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
                    escape(&src),
                    escape(alt)
                );
            }
        }
        Block::Initial { letter } => {
            let _ = write!(out, "<div class=\"avatar initial\">{}</div>", escape(letter));
        }
        Block::Note { title, text } => {
            let _ = write!(out, "<div class=\"note\"><h4>{}</h4><p>{}</p></div>", escape(title), escape(text));
        }
    }
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
