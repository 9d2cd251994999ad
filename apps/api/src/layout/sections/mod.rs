//! Section renderers. Each takes the section's data and the cursor; empty data is a
//! no-op with no cursor movement. Non-empty sections draw a title through
//! `section_header`, then their body, then `SECTION_GAP`.

pub mod education;
pub mod experience;
pub mod extras;
pub mod skills;
pub mod summary;

use crate::layout::canvas::Paint;
use crate::layout::cursor::RenderCursor;
use crate::layout::font_metrics::{text_width, FontStyle};
use crate::layout::template::{HeaderStyle, Rgb};
use crate::layout::text::{truncate_to_width, TextStyle, LINE_HEIGHT};

pub use education::render_education;
pub use experience::{render_experience, render_projects};
pub use extras::render_extras;
pub use skills::render_skills;
pub use summary::render_summary;

/// Trailing space after every non-empty section.
pub const SECTION_GAP: f32 = 10.0;
/// Space between entries inside a section.
pub const ENTRY_GAP: f32 = 6.0;

const TITLE_SIZE: f32 = 12.0;
const TITLE_LINE: f32 = 18.0;
const BOX_PADDING: f32 = 3.0;
const DECORATION_GAP: f32 = 6.0;

/// Largest share of the content width the right-hand text of a split line may take.
const RIGHT_SHARE: f32 = 0.5;
/// Minimum space between the two halves of a split line.
const SPLIT_GUTTER: f32 = 12.0;

/// Size and leading of entry titles (position, degree, project name).
pub const ENTRY_TITLE_SIZE: f32 = 10.5;
pub const ENTRY_TITLE_LINE: f32 = 14.0;

// ────────────────────────────────────────────────────────────────────────────
// Section header primitive
// ────────────────────────────────────────────────────────────────────────────

/// Vertical space the section title consumes, decoration included.
fn header_height(style: HeaderStyle) -> f32 {
    match style {
        HeaderStyle::Modern | HeaderStyle::Classic => TITLE_LINE + DECORATION_GAP,
        HeaderStyle::Executive => 3.0 + TITLE_LINE + DECORATION_GAP,
        HeaderStyle::Tech | HeaderStyle::Creative => {
            TITLE_LINE + 2.0 * BOX_PADDING + DECORATION_GAP
        }
    }
}

/// Draws a centered section title in the template's treatment. Reserves room for the
/// title plus one body line so a header never sits alone at the foot of a page.
pub fn section_header(cursor: &mut RenderCursor, title: &str) {
    let template = cursor.template().clone();
    let face = template.font_family.face(FontStyle::Bold);
    let primary = template.primary_color;

    cursor.ensure_space(header_height(template.header_style) + LINE_HEIGHT);

    match template.header_style {
        HeaderStyle::Modern | HeaderStyle::Classic => {
            cursor.write_centered(title, face, TITLE_SIZE, primary, TITLE_LINE);
            cursor.rule(0.75, primary);
            cursor.advance(DECORATION_GAP);
        }
        HeaderStyle::Executive => {
            cursor.rule(1.5, primary);
            cursor.advance(3.0);
            cursor.write_centered(&title.to_uppercase(), face, TITLE_SIZE, primary, TITLE_LINE);
            cursor.rule(1.5, primary);
            cursor.advance(DECORATION_GAP);
        }
        HeaderStyle::Tech => {
            boxed_title(
                cursor,
                title,
                Paint::fill_and_stroke(template.secondary_color, primary, 0.75),
                primary,
            );
        }
        HeaderStyle::Creative => {
            boxed_title(cursor, title, Paint::fill(primary), Rgb::WHITE);
        }
    }
}

fn boxed_title(cursor: &mut RenderCursor, title: &str, paint: Paint, text_color: Rgb) {
    let face = cursor.template().font_family.face(FontStyle::Bold);
    let (left, y, width) = (cursor.left(), cursor.y(), cursor.content_width());
    cursor.canvas_mut().rounded_rect(
        left,
        y,
        width,
        TITLE_LINE + 2.0 * BOX_PADDING,
        2.0,
        paint,
    );
    cursor.advance(BOX_PADDING);
    cursor.write_centered(title, face, TITLE_SIZE, text_color, TITLE_LINE);
    cursor.advance(BOX_PADDING + DECORATION_GAP);
}

pub fn end_section(cursor: &mut RenderCursor) {
    cursor.advance(SECTION_GAP);
}

// ────────────────────────────────────────────────────────────────────────────
// Entry lines shared by experience, projects and education
// ────────────────────────────────────────────────────────────────────────────

/// One line with `left_text` at the margin and `right_text` flush right on the same
/// baseline. The right text gets at most half the content width; the left text is
/// truncated to what remains so the two never collide.
pub fn split_line(
    cursor: &mut RenderCursor,
    left_text: &str,
    right_text: &str,
    left: TextStyle,
    right: TextStyle,
) {
    let line_height = left.line_height.max(right.line_height);
    cursor.ensure_space(line_height);

    let x = cursor.left();
    let width = cursor.content_width();
    let right_text = truncate_to_width(right_text, width * RIGHT_SHARE, right.face, right.size);
    let right_width = text_width(&right_text, right.face, right.size);
    if !right_text.is_empty() {
        let baseline = cursor.baseline(line_height);
        cursor.canvas_mut().text(
            x + width - right_width,
            baseline,
            &right_text,
            right.face,
            right.size,
            right.color,
        );
    }

    let room = if right_text.is_empty() {
        width
    } else {
        width - right_width - SPLIT_GUTTER
    };
    let left_text = truncate_to_width(left_text, room, left.face, left.size);
    cursor.write_line(x, &left_text, left.face, left.size, left.color, line_height);
}

/// Style for entry titles: bold, slightly larger than body text.
pub fn entry_title_style(cursor: &RenderCursor) -> TextStyle {
    let template = cursor.template();
    TextStyle {
        size: ENTRY_TITLE_SIZE,
        line_height: ENTRY_TITLE_LINE,
        ..TextStyle::body(template).with_style(template, FontStyle::Bold)
    }
}
