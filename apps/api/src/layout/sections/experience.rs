//! Experience and Projects. Both render a bold title line, a meta line, and a
//! description that is always bulleted (prose is split into sentences).

use crate::layout::cursor::RenderCursor;
use crate::layout::dates::format_date_range;
use crate::layout::font_metrics::FontStyle;
use crate::layout::sections::{
    end_section, entry_title_style, section_header, split_line, ENTRY_GAP, ENTRY_TITLE_LINE,
};
use crate::layout::text::{
    clean_text, draw_description, draw_paragraph, ProseMode, TextStyle, LINE_HEIGHT,
    SMALL_LINE_HEIGHT,
};
use crate::models::resume::{Experience, Project};

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn render_experience(cursor: &mut RenderCursor, entries: &[Experience]) {
    let entries: Vec<&Experience> = entries.iter().filter(|e| !e.is_blank()).collect();
    if entries.is_empty() {
        return;
    }
    section_header(cursor, "Professional Experience");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            cursor.advance(ENTRY_GAP);
        }
        render_job(cursor, entry);
    }
    end_section(cursor);
}

fn render_job(cursor: &mut RenderCursor, entry: &Experience) {
    let template = cursor.template().clone();
    let title_style = entry_title_style(cursor);
    let meta = TextStyle::small(&template, FontStyle::Regular);
    let body = TextStyle::body(&template);

    let position = clean_text(&entry.position);
    let company = clean_text(&entry.company);
    let dates = format_date_range(&entry.start_date, &entry.end_date);

    // title + company line + first body line stay together
    cursor.ensure_space(ENTRY_TITLE_LINE + SMALL_LINE_HEIGHT + LINE_HEIGHT);

    if position.is_empty() {
        split_line(cursor, &company, &dates, title_style, meta);
    } else {
        let left = cursor.left();
        cursor.write_line(
            left,
            &position,
            title_style.face,
            title_style.size,
            title_style.color,
            title_style.line_height,
        );
        let company_style = meta
            .with_style(&template, FontStyle::Bold)
            .with_color(template.primary_color);
        split_line(cursor, &company, &dates, company_style, meta);
    }

    let location = clean_text(&entry.location);
    if !location.is_empty() {
        let style = TextStyle::small(&template, FontStyle::Italic);
        let left = cursor.left();
        cursor.write_line(left, &location, style.face, style.size, style.color, style.line_height);
    }

    cursor.advance(2.0);
    let (left, width) = (cursor.left(), cursor.content_width());
    draw_description(cursor, &entry.description, left, width, body, ProseMode::Sentences);
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

pub fn render_projects(cursor: &mut RenderCursor, projects: &[Project]) {
    let projects: Vec<&Project> = projects.iter().filter(|p| !p.is_blank()).collect();
    if projects.is_empty() {
        return;
    }
    section_header(cursor, "Projects");
    for (i, project) in projects.iter().enumerate() {
        if i > 0 {
            cursor.advance(ENTRY_GAP);
        }
        render_project(cursor, project);
    }
    end_section(cursor);
}

fn render_project(cursor: &mut RenderCursor, project: &Project) {
    let template = cursor.template().clone();
    let title_style = entry_title_style(cursor);
    let meta = TextStyle::small(&template, FontStyle::Regular);
    let body = TextStyle::body(&template);
    let (left, width) = (cursor.left(), cursor.content_width());

    cursor.ensure_space(ENTRY_TITLE_LINE + LINE_HEIGHT);
    let name = clean_text(&project.name);
    let dates = format_date_range(&project.start_date, &project.end_date);
    split_line(cursor, &name, &dates, title_style, meta);

    let technologies = clean_text(&project.technologies);
    if !technologies.is_empty() {
        let style = TextStyle::small(&template, FontStyle::Italic);
        draw_paragraph(cursor, &format!("Technologies: {technologies}"), left, width, style);
    }

    let link = clean_text(&project.link);
    if !link.is_empty() {
        let style = meta.with_color(template.primary_color);
        draw_paragraph(cursor, &link, left, width, style);
    }

    cursor.advance(2.0);
    draw_description(cursor, &project.description, left, width, body, ProseMode::Sentences);
}
