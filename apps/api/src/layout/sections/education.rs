use crate::layout::cursor::RenderCursor;
use crate::layout::dates::format_date_range;
use crate::layout::font_metrics::FontStyle;
use crate::layout::sections::{
    end_section, entry_title_style, section_header, split_line, ENTRY_GAP, ENTRY_TITLE_LINE,
};
use crate::layout::text::{
    clean_text, draw_description, has_content, ProseMode, TextStyle, LINE_HEIGHT,
    SMALL_LINE_HEIGHT,
};
use crate::models::resume::Education;

pub fn render_education(cursor: &mut RenderCursor, entries: &[Education]) {
    let entries: Vec<&Education> = entries.iter().filter(|e| !e.is_blank()).collect();
    if entries.is_empty() {
        return;
    }
    section_header(cursor, "Education");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            cursor.advance(ENTRY_GAP);
        }
        render_entry(cursor, entry);
    }
    end_section(cursor);
}

fn render_entry(cursor: &mut RenderCursor, entry: &Education) {
    let template = cursor.template().clone();
    let title_style = entry_title_style(cursor);
    let meta = TextStyle::small(&template, FontStyle::Regular);
    let body = TextStyle::body(&template);
    let (left, width) = (cursor.left(), cursor.content_width());

    let degree = clean_text(&entry.degree);
    let school = clean_text(&entry.school);
    let dates = format_date_range(&entry.start_date, &entry.end_date);

    cursor.ensure_space(ENTRY_TITLE_LINE + SMALL_LINE_HEIGHT + LINE_HEIGHT);

    if degree.is_empty() {
        split_line(cursor, &school, &dates, title_style, meta);
    } else {
        cursor.write_line(
            left,
            &degree,
            title_style.face,
            title_style.size,
            title_style.color,
            title_style.line_height,
        );
        let school_style = meta
            .with_style(&template, FontStyle::Bold)
            .with_color(template.primary_color);
        split_line(cursor, &school, &dates, school_style, meta);
    }

    let location = clean_text(&entry.location);
    if !location.is_empty() {
        let style = TextStyle::small(&template, FontStyle::Italic);
        cursor.write_line(left, &location, style.face, style.size, style.color, style.line_height);
    }

    let gpa = clean_text(&entry.gpa);
    if !gpa.is_empty() {
        cursor.write_line(
            left,
            &format!("GPA: {gpa}"),
            meta.face,
            meta.size,
            meta.color,
            meta.line_height,
        );
    }

    cursor.advance(2.0);
    draw_description(cursor, &entry.description, left, width, body, ProseMode::Paragraph);
    sub_block(cursor, "Relevant Coursework", &entry.courses);
    sub_block(cursor, "Honors & Awards", &entry.honors);
}

/// Bold mini-header followed by the content, prose or bulleted.
fn sub_block(cursor: &mut RenderCursor, title: &str, raw: &str) {
    if !has_content(raw) {
        return;
    }
    let template = cursor.template().clone();
    let heading = TextStyle::small(&template, FontStyle::Bold).with_color(template.primary_color);
    let body = TextStyle::small(&template, FontStyle::Regular);
    let (left, width) = (cursor.left(), cursor.content_width());

    cursor.advance(2.0);
    cursor.ensure_space(heading.line_height + body.line_height);
    cursor.write_line(
        left,
        title,
        heading.face,
        heading.size,
        heading.color,
        heading.line_height,
    );
    draw_description(cursor, raw, left, width, body, ProseMode::Paragraph);
}
