//! Template resolution: maps a numeric template id to its visual configuration.

use serde::Serialize;
use tracing::debug;

use crate::layout::font_metrics::FontFamily;

/// An RGB colour with components in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    #[cfg(test)]
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const TEXT: Rgb = Rgb(33, 37, 41);
    pub const MUTED: Rgb = Rgb(95, 99, 104);

    /// Linear blend towards `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    /// Components as PDF colour operands in 0.0..=1.0.
    pub fn unit(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

/// Visual treatment of the identity block and section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    Modern,
    Executive,
    Classic,
    Creative,
    Tech,
}

/// Known templates. Ids outside this set fall back to `Modern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Modern = 0,
    Executive = 1,
    Classic = 2,
    Creative = 3,
    Tech = 4,
    Minimal = 5,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Modern,
        TemplateId::Executive,
        TemplateId::Classic,
        TemplateId::Creative,
        TemplateId::Tech,
        TemplateId::Minimal,
    ];

    pub fn from_raw(raw: i64) -> Option<TemplateId> {
        match raw {
            0 => Some(TemplateId::Modern),
            1 => Some(TemplateId::Executive),
            2 => Some(TemplateId::Classic),
            3 => Some(TemplateId::Creative),
            4 => Some(TemplateId::Tech),
            5 => Some(TemplateId::Minimal),
            _ => None,
        }
    }
}

/// Immutable styling for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub id: u8,
    pub name: &'static str,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub header_style: HeaderStyle,
    pub font_family: FontFamily,
    /// Glyph drawn in front of every bullet item.
    pub bullet_glyph: char,
    pub max_pills_per_row: usize,
}

impl TemplateConfig {
    fn for_id(id: TemplateId) -> TemplateConfig {
        match id {
            TemplateId::Modern => TemplateConfig {
                id: 0,
                name: "Modern",
                primary_color: Rgb(37, 99, 235),
                secondary_color: Rgb(219, 234, 254),
                header_style: HeaderStyle::Modern,
                font_family: FontFamily::Helvetica,
                bullet_glyph: '\u{2022}',
                max_pills_per_row: 8,
            },
            TemplateId::Executive => TemplateConfig {
                id: 1,
                name: "Executive",
                primary_color: Rgb(30, 41, 59),
                secondary_color: Rgb(226, 232, 240),
                header_style: HeaderStyle::Executive,
                font_family: FontFamily::Helvetica,
                bullet_glyph: '\u{2013}',
                max_pills_per_row: 6,
            },
            TemplateId::Classic => TemplateConfig {
                id: 2,
                name: "Classic",
                primary_color: Rgb(17, 17, 17),
                secondary_color: Rgb(229, 229, 229),
                header_style: HeaderStyle::Classic,
                font_family: FontFamily::Times,
                bullet_glyph: '\u{2022}',
                max_pills_per_row: 7,
            },
            TemplateId::Creative => TemplateConfig {
                id: 3,
                name: "Creative",
                primary_color: Rgb(124, 58, 237),
                secondary_color: Rgb(236, 72, 153),
                header_style: HeaderStyle::Creative,
                font_family: FontFamily::Helvetica,
                bullet_glyph: '\u{00BB}',
                max_pills_per_row: 6,
            },
            TemplateId::Tech => TemplateConfig {
                id: 4,
                name: "Tech",
                primary_color: Rgb(13, 148, 136),
                secondary_color: Rgb(204, 251, 241),
                header_style: HeaderStyle::Tech,
                font_family: FontFamily::Courier,
                bullet_glyph: '>',
                max_pills_per_row: 5,
            },
            TemplateId::Minimal => TemplateConfig {
                id: 5,
                name: "Minimal",
                primary_color: Rgb(71, 85, 105),
                secondary_color: Rgb(241, 245, 249),
                header_style: HeaderStyle::Modern,
                font_family: FontFamily::Helvetica,
                bullet_glyph: '\u{00B7}',
                max_pills_per_row: 8,
            },
        }
    }
}

/// Resolves a raw template id. Unknown ids resolve to the Modern template (id 0).
pub fn resolve_template(raw_id: i64) -> TemplateConfig {
    match TemplateId::from_raw(raw_id) {
        Some(id) => TemplateConfig::for_id(id),
        None => {
            debug!(template_id = raw_id, "Unknown template id, falling back to template 0");
            TemplateConfig::for_id(TemplateId::Modern)
        }
    }
}

/// Every supported template, in id order.
pub fn all_templates() -> Vec<TemplateConfig> {
    TemplateId::ALL
        .iter()
        .map(|id| TemplateConfig::for_id(*id))
        .collect()
}
