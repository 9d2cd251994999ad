//! Skills as a wrapped grid of pills.
//!
//! Row assignment is a pure pass (`layout_pills`) over measured widths; drawing
//! walks the rows, passing each through `ensure_space`.

use crate::layout::canvas::Paint;
use crate::layout::cursor::RenderCursor;
use crate::layout::font_metrics::{text_width, FontFace, FontStyle};
use crate::layout::sections::{end_section, section_header};
use crate::layout::template::{HeaderStyle, Rgb, TemplateConfig};
use crate::layout::text::{clean_text, truncate_to_width};

const PILL_SIZE: f32 = 9.0;
const PILL_HEIGHT: f32 = 16.0;
/// Horizontal padding, both sides together.
const PILL_PADDING: f32 = 16.0;
const PILL_GAP: f32 = 6.0;
const ROW_GAP: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Pill {
    pub label: String,
    pub width: f32,
}

/// Assigns pills to rows. A new row starts when the next pill would overflow
/// `max_width` or the row already holds `max_per_row` pills. Labels too wide for
/// an empty row are truncated.
pub fn layout_pills(
    skills: &[String],
    face: FontFace,
    max_width: f32,
    max_per_row: usize,
) -> Vec<Vec<Pill>> {
    let mut rows: Vec<Vec<Pill>> = Vec::new();
    let mut row: Vec<Pill> = Vec::new();
    let mut row_width = 0.0_f32;

    for skill in skills {
        let label = clean_text(skill);
        if label.is_empty() {
            continue;
        }
        let label = truncate_to_width(&label, max_width - PILL_PADDING, face, PILL_SIZE);
        let width = text_width(&label, face, PILL_SIZE) + PILL_PADDING;

        let fits = row_width + PILL_GAP + width <= max_width;
        if !row.is_empty() && (!fits || row.len() >= max_per_row.max(1)) {
            rows.push(std::mem::take(&mut row));
            row_width = 0.0;
        }
        row_width += if row.is_empty() { width } else { PILL_GAP + width };
        row.push(Pill { label, width });
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

pub fn render_skills(cursor: &mut RenderCursor, skills: &[String]) {
    let template = cursor.template().clone();
    let face = template.font_family.face(FontStyle::Regular);
    let rows = layout_pills(
        skills,
        face,
        cursor.content_width(),
        template.max_pills_per_row,
    );
    if rows.is_empty() {
        return;
    }

    section_header(cursor, "Skills");
    for row in &rows {
        cursor.ensure_space(PILL_HEIGHT);
        let y = cursor.y();
        let mut x = cursor.left();
        for pill in row {
            draw_pill(cursor, &template, face, pill, x, y);
            x += pill.width + PILL_GAP;
        }
        cursor.advance(PILL_HEIGHT + ROW_GAP);
    }
    end_section(cursor);
}

fn draw_pill(
    cursor: &mut RenderCursor,
    template: &TemplateConfig,
    face: FontFace,
    pill: &Pill,
    x: f32,
    y: f32,
) {
    let primary = template.primary_color;
    let secondary = template.secondary_color;
    let canvas = cursor.canvas_mut();

    let text_color = match template.header_style {
        HeaderStyle::Modern | HeaderStyle::Classic => {
            canvas.rounded_rect(
                x,
                y,
                pill.width,
                PILL_HEIGHT,
                PILL_HEIGHT / 2.0,
                Paint::fill(secondary),
            );
            primary
        }
        HeaderStyle::Tech => {
            canvas.rounded_rect(
                x,
                y,
                pill.width,
                PILL_HEIGHT,
                3.0,
                Paint::fill_and_stroke(secondary, primary, 0.5),
            );
            primary
        }
        HeaderStyle::Executive => {
            canvas.rect(x, y, pill.width, PILL_HEIGHT, Paint::fill(secondary));
            primary
        }
        HeaderStyle::Creative => {
            // Two layers: blended base, lighter highlight on the upper half.
            canvas.rounded_rect(
                x,
                y,
                pill.width,
                PILL_HEIGHT,
                PILL_HEIGHT / 2.0,
                Paint::fill(primary.mix(secondary, 0.5)),
            );
            canvas.rounded_rect(
                x + 2.0,
                y + 1.5,
                pill.width - 4.0,
                PILL_HEIGHT * 0.45,
                PILL_HEIGHT * 0.225,
                Paint::fill(primary.mix(Rgb::WHITE, 0.2)),
            );
            Rgb::WHITE
        }
    };

    let baseline = y + PILL_HEIGHT / 2.0 + PILL_SIZE * 0.35;
    canvas.text(x + PILL_PADDING / 2.0, baseline, &pill.label, face, PILL_SIZE, text_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::DrawOp;
    use crate::layout::cursor::PageGeometry;
    use crate::layout::template::resolve_template;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_respects_max_per_row() {
        let rows = layout_pills(&skills(&["a", "b", "c", "d", "e"]), FontFace::Helvetica, 500.0, 2);
        let sizes: Vec<usize> = rows.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_layout_wraps_on_width() {
        let rows = layout_pills(
            &skills(&["Kubernetes", "PostgreSQL", "Terraform"]),
            FontFace::Helvetica,
            150.0,
            10,
        );
        assert!(rows.len() >= 2);
        for row in &rows {
            let total: f32 =
                row.iter().map(|p| p.width).sum::<f32>() + PILL_GAP * (row.len() - 1) as f32;
            assert!(total <= 150.0);
        }
    }

    #[test]
    fn test_layout_skips_blank_and_truncates_oversized() {
        let long = "x".repeat(300);
        let rows = layout_pills(&skills(&["", "  ", long.as_str()]), FontFace::Helvetica, 200.0, 5);
        assert_eq!(rows.len(), 1);
        assert!(rows[0][0].label.ends_with("..."));
        assert!(rows[0][0].width <= 200.0);
    }

    #[test]
    fn test_empty_skills_is_noop() {
        let mut cursor = RenderCursor::new(PageGeometry::default(), resolve_template(0));
        render_skills(&mut cursor, &skills(&["", " "]));
        assert_eq!(cursor.y(), PageGeometry::default().margin);
        assert!(cursor.canvas().pages()[0].ops.is_empty());
    }

    #[test]
    fn test_overflowing_pill_starts_new_row_at_margin() {
        let mut cursor = RenderCursor::new(PageGeometry::default(), resolve_template(0));
        let width = cursor.content_width();
        // Each label is a bit under half the row, so the third must wrap.
        let label = "M".repeat(20);
        let label_width = text_width(&label, FontFace::Helvetica, PILL_SIZE) + PILL_PADDING;
        assert!(label_width * 2.0 + PILL_GAP <= width && label_width * 3.0 + 2.0 * PILL_GAP > width);
        let names = vec![format!("{label}1"), format!("{label}2"), format!("{label}3")];
        render_skills(&mut cursor, &names);

        let pills: Vec<(f32, f32, String)> = cursor.canvas().pages()[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, text, .. } if text.starts_with('M') => {
                    Some((*x, *y, text.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(pills.len(), 3);
        let margin = PageGeometry::default().margin;
        assert_eq!(pills[2].0, margin + PILL_PADDING / 2.0);
        assert!(pills[2].1 > pills[0].1);
        assert_eq!(pills[0].1, pills[1].1);
    }

    #[test]
    fn test_every_style_draws_a_shape_per_pill() {
        for template_id in 0..6 {
            let mut cursor = RenderCursor::new(PageGeometry::default(), resolve_template(template_id));
            render_skills(&mut cursor, &skills(&["Go", "Rust"]));
            let texts: Vec<&str> = cursor.canvas().pages()[0].texts().collect();
            assert!(texts.contains(&"Go") && texts.contains(&"Rust"), "template {template_id}");
            let pill_shapes = cursor.canvas().pages()[0]
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Rect { h, .. } if *h == PILL_HEIGHT))
                .count();
            assert_eq!(pill_shapes, 2, "template {template_id}");
        }
    }
}
