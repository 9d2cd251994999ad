//! Header renderer: the identity block at the top of page 1.

use crate::layout::canvas::Paint;
use crate::layout::cursor::RenderCursor;
use crate::layout::font_metrics::{FontFace, FontStyle};
use crate::layout::template::{HeaderStyle, Rgb};
use crate::layout::text::{clean_text, wrap};
use crate::models::resume::PersonalInfo;

const NAME_SIZE: f32 = 22.0;
const NAME_LINE: f32 = 28.0;
const TITLE_SIZE: f32 = 12.0;
const TITLE_LINE: f32 = 16.0;
const CONTACT_SIZE: f32 = 9.0;
const CONTACT_LINE: f32 = 13.0;

const RULE_WIDTH: f32 = 1.0;
const HEAVY_RULE_WIDTH: f32 = 2.0;
/// Space between the decoration and the first section.
const HEADER_GAP: f32 = 14.0;

const BAND_TOP_PADDING: f32 = 30.0;
const BAND_BOTTOM_PADDING: f32 = 18.0;
const BAND_STRIPS: usize = 12;

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Center,
    Left,
}

/// Joins the present contact fields with `" | "`.
pub fn contact_line(personal: &PersonalInfo) -> String {
    [
        &personal.email,
        &personal.phone,
        &personal.location,
        &personal.website,
        &personal.linkedin,
        &personal.github,
    ]
    .iter()
    .map(|field| clean_text(field))
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(" | ")
}

/// Draws the header. A missing name skips the whole block.
pub fn render_header(cursor: &mut RenderCursor, personal: &PersonalInfo) {
    let name = clean_text(&personal.full_name);
    if name.is_empty() {
        return;
    }
    let title = clean_text(&personal.title);
    let contact = contact_line(personal);
    let primary = cursor.template().primary_color;

    match cursor.template().header_style {
        HeaderStyle::Modern | HeaderStyle::Classic => {
            write_identity(cursor, &name, &title, &contact, Align::Center, primary);
            cursor.advance(4.0);
            cursor.rule(RULE_WIDTH, primary);
        }
        HeaderStyle::Executive => {
            write_identity(cursor, &name, &title, &contact, Align::Center, primary);
            cursor.advance(4.0);
            cursor.rule(HEAVY_RULE_WIDTH, primary);
        }
        HeaderStyle::Tech => {
            write_identity(cursor, &name, &title, &contact, Align::Left, primary);
            cursor.advance(4.0);
            cursor.rule(1.5, primary);
            cursor.advance(2.5);
            cursor.rule(0.5, primary);
        }
        HeaderStyle::Creative => {
            draw_band(cursor, &name, &title, &contact);
        }
    }
    cursor.advance(HEADER_GAP);
}

/// Name, optional title, contact line. Long values wrap.
fn write_identity(
    cursor: &mut RenderCursor,
    name: &str,
    title: &str,
    contact: &str,
    align: Align,
    name_color: Rgb,
) {
    let template = cursor.template().clone();
    let bold = template.font_family.face(FontStyle::Bold);
    let regular = template.font_family.face(FontStyle::Regular);
    let (title_color, contact_color) = if name_color == Rgb::WHITE {
        (Rgb::WHITE, Rgb::WHITE)
    } else {
        (Rgb::TEXT, Rgb::MUTED)
    };
    let width = cursor.content_width();
    let left = cursor.left();

    let write = |cursor: &mut RenderCursor,
                 text: &str,
                 face: FontFace,
                 size: f32,
                 color: Rgb,
                 line: f32| {
        for wrapped in wrap(text, width, face, size) {
            match align {
                Align::Center => cursor.write_centered(&wrapped, face, size, color, line),
                Align::Left => cursor.write_line(left, &wrapped, face, size, color, line),
            }
        }
    };

    write(cursor, name, bold, NAME_SIZE, name_color, NAME_LINE);
    if !title.is_empty() {
        write(cursor, title, regular, TITLE_SIZE, title_color, TITLE_LINE);
    }
    if !contact.is_empty() {
        write(cursor, contact, regular, CONTACT_SIZE, contact_color, CONTACT_LINE);
    }
}

/// Full-bleed colour band with a simulated vertical gradient; identity text in white.
fn draw_band(cursor: &mut RenderCursor, name: &str, title: &str, contact: &str) {
    let template = cursor.template().clone();
    let width = cursor.content_width();
    let page_width = cursor.geometry().width;
    let bold = template.font_family.face(FontStyle::Bold);
    let regular = template.font_family.face(FontStyle::Regular);

    let mut text_height = wrap(name, width, bold, NAME_SIZE).len() as f32 * NAME_LINE;
    if !title.is_empty() {
        text_height += wrap(title, width, regular, TITLE_SIZE).len() as f32 * TITLE_LINE;
    }
    if !contact.is_empty() {
        text_height += wrap(contact, width, regular, CONTACT_SIZE).len() as f32 * CONTACT_LINE;
    }
    let band_height = BAND_TOP_PADDING + text_height + BAND_BOTTOM_PADDING;

    let strip = band_height / BAND_STRIPS as f32;
    for i in 0..BAND_STRIPS {
        let t = i as f32 / (BAND_STRIPS - 1) as f32;
        let color = template.primary_color.mix(template.secondary_color, t);
        // 0.5pt overlap hides hairline seams between strips
        cursor.canvas_mut().rect(
            0.0,
            i as f32 * strip,
            page_width,
            strip + 0.5,
            Paint::fill(color),
        );
    }

    cursor.set_y(BAND_TOP_PADDING);
    write_identity(cursor, name, title, contact, Align::Center, Rgb::WHITE);
    cursor.set_y(band_height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::DrawOp;
    use crate::layout::cursor::PageGeometry;
    use crate::layout::font_metrics::text_width;
    use crate::layout::template::resolve_template;

    fn make_personal() -> PersonalInfo {
        PersonalInfo {
            full_name: "Jane Doe".to_string(),
            title: "Staff Engineer".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-0100".to_string(),
            location: "Berlin".to_string(),
            ..Default::default()
        }
    }

    fn render(template_id: i64, personal: &PersonalInfo) -> RenderCursor {
        let mut cursor = RenderCursor::new(PageGeometry::default(), resolve_template(template_id));
        render_header(&mut cursor, personal);
        cursor
    }

    fn text_x(cursor: &RenderCursor, needle: &str) -> f32 {
        cursor.canvas().pages()[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, .. } if text == needle => Some(*x),
                _ => None,
            })
            .unwrap_or_else(|| panic!("{needle} not drawn"))
    }

    #[test]
    fn test_contact_line_skips_absent_fields() {
        let personal = PersonalInfo {
            email: "jane@x.com".to_string(),
            location: " Berlin ".to_string(),
            github: "github.com/jane".to_string(),
            ..Default::default()
        };
        assert_eq!(
            contact_line(&personal),
            "jane@x.com | Berlin | github.com/jane"
        );
    }

    #[test]
    fn test_missing_name_skips_header() {
        let personal = PersonalInfo {
            email: "jane@x.com".to_string(),
            ..Default::default()
        };
        let cursor = render(0, &personal);
        assert!(cursor.canvas().pages()[0].ops.is_empty());
        assert_eq!(cursor.y(), PageGeometry::default().margin);
    }

    #[test]
    fn test_modern_header_centers_name() {
        let cursor = render(0, &make_personal());
        let geometry = PageGeometry::default();
        let template = resolve_template(0);
        let face = template.font_family.face(FontStyle::Bold);
        let expected = (geometry.width - text_width("Jane Doe", face, NAME_SIZE)) / 2.0;
        assert!((text_x(&cursor, "Jane Doe") - expected).abs() < 1e-3);
        let contact = text_x(&cursor, "jane@x.com | 555-0100 | Berlin");
        assert!(contact > geometry.margin);
    }

    #[test]
    fn test_tech_header_is_left_aligned_with_double_rule() {
        let cursor = render(4, &make_personal());
        assert_eq!(text_x(&cursor, "Jane Doe"), PageGeometry::default().margin);
        let rules = cursor.canvas().pages()[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(rules, 2);
    }

    #[test]
    fn test_creative_header_draws_band_without_rule() {
        let cursor = render(3, &make_personal());
        let ops = &cursor.canvas().pages()[0].ops;
        let strips = ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. })).count();
        assert_eq!(strips, BAND_STRIPS);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
        let name_color = ops.iter().find_map(|op| match op {
            DrawOp::Text { text, color, .. } if text == "Jane Doe" => Some(*color),
            _ => None,
        });
        assert_eq!(name_color, Some(Rgb::WHITE));
    }

    #[test]
    fn test_executive_rule_is_heavier() {
        let cursor = render(1, &make_personal());
        let width = cursor.canvas().pages()[0].ops.iter().find_map(|op| match op {
            DrawOp::Line { width, .. } => Some(*width),
            _ => None,
        });
        assert_eq!(width, Some(HEAVY_RULE_WIDTH));
    }
}
