//! Certifications / Languages / Interests block.
//!
//! Certifications and languages share a two-column region drawn row by row, so a
//! page break can fall between rows but never splits a row. Interests follow as a
//! full-width line under the taller column.

use crate::layout::cursor::RenderCursor;
use crate::layout::dates::format_date;
use crate::layout::font_metrics::FontStyle;
use crate::layout::sections::{end_section, section_header};
use crate::layout::template::{Rgb, TemplateConfig};
use crate::layout::text::{clean_text, draw_paragraph, wrap, TextStyle};
use crate::models::resume::{present_strings, Certification, Language};

const COLUMN_GAP: f32 = 20.0;
/// Space between consecutive items in one column.
const ITEM_GAP_LINES: usize = 1;

#[derive(Debug, Clone, PartialEq)]
struct ColumnLine {
    text: String,
    style: TextStyle,
}

pub fn render_extras(
    cursor: &mut RenderCursor,
    certifications: &[Certification],
    languages: &[Language],
    interests: &[String],
) {
    let certifications: Vec<&Certification> =
        certifications.iter().filter(|c| !c.is_blank()).collect();
    let languages: Vec<&Language> = languages.iter().filter(|l| !l.is_blank()).collect();
    let interests: Vec<String> = present_strings(interests)
        .into_iter()
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .collect();

    if certifications.is_empty() && languages.is_empty() && interests.is_empty() {
        return;
    }

    let template = cursor.template().clone();
    section_header(cursor, "Additional Information");

    let full = cursor.content_width();
    let half = (full - COLUMN_GAP) / 2.0;
    let both = !certifications.is_empty() && !languages.is_empty();
    let column_width = if both { half } else { full };

    let left_column = certification_lines(&template, &certifications, column_width);
    let right_column = language_lines(&template, &languages, column_width);

    if both {
        draw_columns(cursor, &left_column, &right_column, half + COLUMN_GAP);
    } else if !left_column.is_empty() {
        draw_columns(cursor, &left_column, &[], 0.0);
    } else if !right_column.is_empty() {
        draw_columns(cursor, &right_column, &[], 0.0);
    }

    if !interests.is_empty() {
        if !left_column.is_empty() || !right_column.is_empty() {
            cursor.advance(4.0);
        }
        let heading = mini_header(&template);
        let body = TextStyle::small(&template, FontStyle::Regular);
        cursor.ensure_space(heading.line_height + body.line_height);
        let left = cursor.left();
        cursor.write_line(
            left,
            "Interests",
            heading.face,
            heading.size,
            heading.color,
            heading.line_height,
        );
        draw_paragraph(cursor, &interests.join(", "), left, full, body);
    }

    end_section(cursor);
}

fn mini_header(template: &TemplateConfig) -> TextStyle {
    TextStyle::small(template, FontStyle::Bold).with_color(template.primary_color)
}

fn push_wrapped(lines: &mut Vec<ColumnLine>, text: &str, style: TextStyle, width: f32) {
    for text in wrap(text, width, style.face, style.size) {
        lines.push(ColumnLine { text, style });
    }
}

fn certification_lines(
    template: &TemplateConfig,
    certifications: &[&Certification],
    width: f32,
) -> Vec<ColumnLine> {
    if certifications.is_empty() {
        return Vec::new();
    }
    let name_style = TextStyle::small(template, FontStyle::Bold).with_color(Rgb::TEXT);
    let meta_style = TextStyle::small(template, FontStyle::Regular);

    let mut lines = Vec::new();
    push_wrapped(&mut lines, "Certifications", mini_header(template), width);
    for (i, cert) in certifications.iter().enumerate() {
        if i > 0 {
            lines.extend(blank_lines(meta_style));
        }
        push_wrapped(&mut lines, &clean_text(&cert.name), name_style, width);

        let meta: Vec<String> = [clean_text(&cert.issuer), format_date(&cert.date)]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !meta.is_empty() {
            push_wrapped(&mut lines, &meta.join(" | "), meta_style, width);
        }
        let credential = clean_text(&cert.credential_id);
        if !credential.is_empty() {
            push_wrapped(&mut lines, &format!("ID: {credential}"), meta_style, width);
        }
    }
    lines
}

fn language_lines(
    template: &TemplateConfig,
    languages: &[&Language],
    width: f32,
) -> Vec<ColumnLine> {
    if languages.is_empty() {
        return Vec::new();
    }
    let style = TextStyle::small(template, FontStyle::Regular).with_color(Rgb::TEXT);

    let mut lines = Vec::new();
    push_wrapped(&mut lines, "Languages", mini_header(template), width);
    for language in languages {
        let name = clean_text(&language.language);
        let proficiency = clean_text(&language.proficiency);
        let text = if proficiency.is_empty() {
            name
        } else {
            format!("{name} ({proficiency})")
        };
        push_wrapped(&mut lines, &text, style, width);
    }
    lines
}

fn blank_lines(style: TextStyle) -> impl Iterator<Item = ColumnLine> {
    std::iter::repeat(ColumnLine {
        text: String::new(),
        style,
    })
    .take(ITEM_GAP_LINES)
}

/// Draws two pre-wrapped columns in lock step. `right_offset` is the x offset of
/// the right column from the left margin.
fn draw_columns(
    cursor: &mut RenderCursor,
    left: &[ColumnLine],
    right: &[ColumnLine],
    right_offset: f32,
) {
    let rows = left.len().max(right.len());
    let x = cursor.left();
    for row in 0..rows {
        let line_height = [left.get(row), right.get(row)]
            .into_iter()
            .flatten()
            .map(|l| l.style.line_height)
            .fold(0.0_f32, f32::max);
        cursor.ensure_space(line_height);
        let baseline = cursor.baseline(line_height);
        for (line, offset) in [(left.get(row), 0.0), (right.get(row), right_offset)] {
            if let Some(line) = line {
                let style = line.style;
                cursor.canvas_mut().text(
                    x + offset,
                    baseline,
                    &line.text,
                    style.face,
                    style.size,
                    style.color,
                );
            }
        }
        cursor.advance(line_height);
    }
}
