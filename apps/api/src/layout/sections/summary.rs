use crate::layout::cursor::RenderCursor;
use crate::layout::sections::{end_section, section_header};
use crate::layout::text::{clean_text, draw_paragraph, TextStyle};
use crate::models::resume::PersonalInfo;

pub fn render_summary(cursor: &mut RenderCursor, personal: &PersonalInfo) {
    let summary = clean_text(&personal.summary);
    if summary.is_empty() {
        return;
    }
    section_header(cursor, "Professional Summary");
    let style = TextStyle::body(cursor.template());
    let (left, width) = (cursor.left(), cursor.content_width());
    draw_paragraph(cursor, &summary, left, width, style);
    end_section(cursor);
}
