//! Text/bullet formatter: sanitising, word-wrap, and the paragraph/bullet writers.
//!
//! The prose-vs-bullets decision is split out as pure functions
//! (`classify_description`, `split_bullets`, `split_sentences`) so it can be tested
//! without a cursor.

use crate::layout::cursor::RenderCursor;
use crate::layout::font_metrics::{get_metrics, win_ansi_byte, FontFace, FontMetricTable, FontStyle};
use crate::layout::template::{Rgb, TemplateConfig};

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

pub const BODY_SIZE: f32 = 10.0;
pub const SMALL_SIZE: f32 = 9.0;
pub const LINE_HEIGHT: f32 = 13.0;
pub const SMALL_LINE_HEIGHT: f32 = 12.0;
/// Horizontal offset of bullet text from the glyph column.
pub const BULLET_INDENT: f32 = 12.0;
const BULLET_GLYPH_OFFSET: f32 = 2.0;
const BULLET_GAP: f32 = 1.5;

/// Face, size, colour and leading for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
    pub line_height: f32,
}

impl TextStyle {
    pub fn body(template: &TemplateConfig) -> TextStyle {
        TextStyle {
            face: template.font_family.face(FontStyle::Regular),
            size: BODY_SIZE,
            color: Rgb::TEXT,
            line_height: LINE_HEIGHT,
        }
    }

    pub fn small(template: &TemplateConfig, style: FontStyle) -> TextStyle {
        TextStyle {
            face: template.font_family.face(style),
            size: SMALL_SIZE,
            color: Rgb::MUTED,
            line_height: SMALL_LINE_HEIGHT,
        }
    }

    pub fn with_style(self, template: &TemplateConfig, style: FontStyle) -> TextStyle {
        TextStyle {
            face: template.font_family.face(style),
            ..self
        }
    }

    pub fn with_color(self, color: Rgb) -> TextStyle {
        TextStyle { color, ..self }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cleaning
// ────────────────────────────────────────────────────────────────────────────

/// Glyphs that mark a bullet wherever they appear.
const BULLET_GLYPHS: &[char] = &[
    '\u{2022}', '\u{25CF}', '\u{25E6}', '\u{25AA}', '\u{25A0}', '\u{2023}', '\u{25CB}',
    '\u{25BA}', '\u{25B8}', '\u{27A2}', '\u{2713}', '\u{2714}', '\u{00B7}',
];

/// ASCII-ish markers that only count as bullets at the start of an item, followed by a space.
const LEADING_MARKERS: &[char] = &['-', '*', '+', '>', '\u{2013}', '\u{2014}', '\u{00BB}'];

/// Removes control and zero-width characters, folds characters the standard fonts
/// cannot show, and collapses whitespace runs into single spaces.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() || matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{00AD}') {
            continue;
        }
        let c = match c {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => '-',
            '\u{2032}' => '\'',
            '\u{2033}' => '"',
            other => other,
        };
        if win_ansi_byte(c).is_none() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Strips one leading bullet marker (and the whitespace after it).
pub fn strip_bullet_marker(item: &str) -> &str {
    let trimmed = item.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => chars.as_str().trim_start(),
        Some(c) if LEADING_MARKERS.contains(&c) => {
            let rest = chars.as_str();
            if rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                trimmed
            }
        }
        _ => trimmed,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prose / bullet classification
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionKind {
    Empty,
    Prose,
    Bulleted,
}

/// How a caller wants prose (delimiter-free) descriptions rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProseMode {
    Paragraph,
    /// One bullet per sentence.
    Sentences,
}

/// First stage: decide whether a raw description carries explicit bullet structure.
/// Bulleted content that splits into no items (a lone glyph, blank lines) is empty.
pub fn classify_description(raw: &str) -> DescriptionKind {
    if clean_text(raw).is_empty() {
        DescriptionKind::Empty
    } else if raw.contains('\n') || raw.contains(BULLET_GLYPHS) {
        if split_bullets(raw).is_empty() {
            DescriptionKind::Empty
        } else {
            DescriptionKind::Bulleted
        }
    } else {
        DescriptionKind::Prose
    }
}

/// Whether free text would draw anything once cleaned and split.
pub fn has_content(raw: &str) -> bool {
    classify_description(raw) != DescriptionKind::Empty
}

/// Second stage for bulleted content: split on newlines and bullet glyphs,
/// strip markers, clean, and drop empty items.
pub fn split_bullets(raw: &str) -> Vec<String> {
    raw.split('\n')
        .flat_map(|line| line.split(BULLET_GLYPHS))
        .map(|part| clean_text(strip_bullet_marker(part)))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Second stage for prose: sentence split on `.`, `!` or `?` followed by whitespace
/// and an uppercase letter or digit. Abbreviations like "e.g. the" stay together.
pub fn split_sentences(raw: &str) -> Vec<String> {
    let text = clean_text(raw);
    let mut sentences = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    for i in 0..chars.len() {
        let (idx, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let next_is_space = chars.get(i + 1).map(|(_, n)| *n == ' ').unwrap_or(false);
        let after = chars.get(i + 2).map(|(_, n)| *n);
        if next_is_space && after.map(|n| n.is_uppercase() || n.is_ascii_digit()).unwrap_or(false) {
            let end = idx + c.len_utf8();
            sentences.push(text[start..end].trim().to_string());
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap to `max_width` points. Words wider than a full line are
/// hard-broken between characters.
pub fn wrap(text: &str, max_width: f32, face: FontFace, size: f32) -> Vec<String> {
    let metrics = get_metrics(face);
    let space = metrics.space_width(size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in break_word(word, max_width, metrics, size) {
            let piece_w = metrics.measure(&piece, size);
            if current.is_empty() {
                current = piece;
                current_width = piece_w;
            } else if current_width + space + piece_w > max_width {
                lines.push(std::mem::take(&mut current));
                current = piece;
                current_width = piece_w;
            } else {
                current.push(' ');
                current.push_str(&piece);
                current_width += space + piece_w;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, max_width: f32, metrics: &FontMetricTable, size: f32) -> Vec<String> {
    if metrics.measure(word, size) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = f32::from(metrics.char_width(c)) * size / 1000.0;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
pub fn truncate_to_width(text: &str, max_width: f32, face: FontFace, size: f32) -> String {
    let metrics = get_metrics(face);
    if metrics.measure(text, size) <= max_width {
        return text.to_string();
    }
    let ellipsis = "...";
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        let candidate = format!("{out}{ellipsis}");
        if metrics.measure(&candidate, size) > max_width {
            out.pop();
            break;
        }
    }
    format!("{}{ellipsis}", out.trim_end())
}

// ────────────────────────────────────────────────────────────────────────────
// Writers
// ────────────────────────────────────────────────────────────────────────────

/// Wraps and writes a paragraph. Page breaks may fall between lines.
pub fn draw_paragraph(cursor: &mut RenderCursor, text: &str, x: f32, width: f32, style: TextStyle) {
    let text = clean_text(text);
    for line in wrap(&text, width, style.face, style.size) {
        cursor.write_line(x, &line, style.face, style.size, style.color, style.line_height);
    }
}

/// Writes each item as a bullet: the template glyph, then wrapped text indented past it.
///
/// An item that fits on an empty page is kept together; longer items break between lines.
pub fn draw_bullets(
    cursor: &mut RenderCursor,
    items: &[String],
    x: f32,
    width: f32,
    style: TextStyle,
) {
    let glyph = cursor.template().bullet_glyph.to_string();
    let glyph_color = cursor.template().primary_color;
    let text_x = x + BULLET_INDENT;
    let text_width = width - BULLET_INDENT;

    for item in items {
        let item = clean_text(strip_bullet_marker(item));
        let lines = wrap(&item, text_width, style.face, style.size);
        if lines.is_empty() {
            continue;
        }

        let estimated = lines.len() as f32 * style.line_height;
        if estimated <= cursor.geometry().usable_height() {
            cursor.ensure_space(estimated);
        }

        for (i, line) in lines.iter().enumerate() {
            cursor.ensure_space(style.line_height);
            if i == 0 {
                let baseline = cursor.baseline(style.line_height);
                cursor.canvas_mut().text(
                    x + BULLET_GLYPH_OFFSET,
                    baseline,
                    &glyph,
                    style.face,
                    style.size,
                    glyph_color,
                );
            }
            cursor.write_line(text_x, line, style.face, style.size, style.color, style.line_height);
        }
        cursor.advance(BULLET_GAP);
    }
}

/// Routes a free-text description: bulleted content becomes bullets, prose is
/// rendered according to `prose_mode`.
pub fn draw_description(
    cursor: &mut RenderCursor,
    raw: &str,
    x: f32,
    width: f32,
    style: TextStyle,
    prose_mode: ProseMode,
) {
    match classify_description(raw) {
        DescriptionKind::Empty => {}
        DescriptionKind::Bulleted => draw_bullets(cursor, &split_bullets(raw), x, width, style),
        DescriptionKind::Prose => match prose_mode {
            ProseMode::Paragraph => draw_paragraph(cursor, raw, x, width, style),
            ProseMode::Sentences => draw_bullets(cursor, &split_sentences(raw), x, width, style),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::DrawOp;
    use crate::layout::cursor::PageGeometry;
    use crate::layout::font_metrics::text_width;
    use crate::layout::template::resolve_template;

    fn make_cursor(template_id: i64) -> RenderCursor {
        RenderCursor::new(PageGeometry::default(), resolve_template(template_id))
    }

    // ── clean_text ──────────────────────────────────────────────────────────

    #[test]
    fn test_clean_text_collapses_whitespace_and_controls() {
        assert_eq!(clean_text("  Led\t\tthe   team\r\n\u{0007}now "), "Led the team now");
    }

    #[test]
    fn test_clean_text_drops_unrenderable_characters() {
        assert_eq!(clean_text("Shipped \u{1F680} fast"), "Shipped fast");
        assert_eq!(clean_text("zero\u{200B}width"), "zerowidth");
    }

    #[test]
    fn test_clean_text_keeps_latin1_and_typographic_quotes() {
        assert_eq!(clean_text("Café \u{201C}ok\u{201D}"), "Café \u{201C}ok\u{201D}");
    }

    #[test]
    fn test_clean_text_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }

    // ── classification ──────────────────────────────────────────────────────

    #[test]
    fn test_classify_prose_bulleted_empty() {
        assert_eq!(classify_description("Built systems"), DescriptionKind::Prose);
        assert_eq!(classify_description("a\nb"), DescriptionKind::Bulleted);
        assert_eq!(classify_description("\u{2022} a"), DescriptionKind::Bulleted);
        assert_eq!(classify_description("   "), DescriptionKind::Empty);
        // hyphens inside prose are not markers
        assert_eq!(classify_description("cross-team work"), DescriptionKind::Prose);
    }

    #[test]
    fn test_glyph_only_description_is_empty() {
        assert_eq!(classify_description("\u{2022}"), DescriptionKind::Empty);
        assert_eq!(classify_description("\u{2022} \n - \n\u{25CF}"), DescriptionKind::Empty);
        assert!(!has_content("\u{2022} "));
        assert!(has_content("\u{2022} Shipped"));
    }

    #[test]
    fn test_split_bullets_mixed_markers_yields_three_items() {
        let items = split_bullets("Did X.\nDid Y.\n\u{2022} Did Z.");
        assert_eq!(items, vec!["Did X.", "Did Y.", "Did Z."]);
    }

    #[test]
    fn test_split_bullets_inline_glyphs_and_dash_markers() {
        let items = split_bullets("\u{2022} One \u{2022} Two\n- Three\n\n* Four");
        assert_eq!(items, vec!["One", "Two", "Three", "Four"]);
    }

    #[test]
    fn test_strip_marker_keeps_negative_numbers() {
        assert_eq!(strip_bullet_marker("-5% churn"), "-5% churn");
        assert_eq!(strip_bullet_marker("- Cut churn"), "Cut churn");
        assert_eq!(strip_bullet_marker("\u{2022}Cut churn"), "Cut churn");
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Led a team. Shipped v2! Cut costs by 30%."),
            vec!["Led a team.", "Shipped v2!", "Cut costs by 30%."]
        );
        assert_eq!(split_sentences("Built systems"), vec!["Built systems"]);
        assert_eq!(
            split_sentences("Used tools e.g. the compiler."),
            vec!["Used tools e.g. the compiler."]
        );
    }

    // ── wrap ────────────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_respects_width() {
        let text = "Architected a distributed caching layer using consistent hashing \
                    which reduced tail latency by forty percent under peak load";
        let lines = wrap(text, 200.0, FontFace::Helvetica, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontFace::Helvetica, 10.0) <= 200.0, "{line}");
        }
        assert_eq!(lines.join(" "), clean_text(text));
    }

    #[test]
    fn test_wrap_hard_breaks_oversized_word() {
        let word = "a".repeat(200);
        let lines = wrap(&word, 100.0, FontFace::Helvetica, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, FontFace::Helvetica, 10.0) <= 100.0);
        }
    }

    #[test]
    fn test_wrap_empty_is_no_lines() {
        assert!(wrap("", 100.0, FontFace::Helvetica, 10.0).is_empty());
    }

    #[test]
    fn test_truncate_to_width_adds_ellipsis() {
        let long = "Distributed Systems Engineering and Site Reliability";
        let out = truncate_to_width(long, 80.0, FontFace::Helvetica, 9.0);
        assert!(out.ends_with("..."));
        assert!(text_width(&out, FontFace::Helvetica, 9.0) <= 80.0);
        assert_eq!(truncate_to_width("Go", 80.0, FontFace::Helvetica, 9.0), "Go");
    }

    // ── writers ─────────────────────────────────────────────────────────────

    #[test]
    fn test_draw_bullets_uses_canonical_glyph_once_per_item() {
        for template_id in 0..6 {
            let mut cursor = make_cursor(template_id);
            let style = TextStyle::body(cursor.template());
            let glyph = cursor.template().bullet_glyph.to_string();
            let items = split_bullets("Did X.\nDid Y.\n\u{2022} Did Z.");
            let width = cursor.content_width();
            let left = cursor.left();
            draw_bullets(&mut cursor, &items, left, width, style);

            let texts: Vec<&str> = cursor.canvas().pages()[0].texts().collect();
            let glyphs = texts.iter().filter(|t| **t == glyph).count();
            assert_eq!(glyphs, 3, "template {template_id}");
            assert_eq!(
                texts.iter().filter(|t| t.starts_with("Did")).count(),
                3,
                "template {template_id}"
            );
            assert!(!texts.iter().any(|t| t.contains('\u{2022}') && t.len() > 3));
        }
    }

    #[test]
    fn test_draw_paragraph_splits_across_pages_between_lines() {
        let mut cursor = make_cursor(0);
        let style = TextStyle::body(cursor.template());
        let text = "word ".repeat(3000);
        let width = cursor.content_width();
        let left = cursor.left();
        draw_paragraph(&mut cursor, &text, left, width, style);
        assert!(cursor.page_count() > 1);
        let limit = cursor.geometry().bottom_limit();
        for page in cursor.canvas().pages() {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y <= limit);
                }
            }
        }
    }

    #[test]
    fn test_draw_description_empty_is_noop() {
        let mut cursor = make_cursor(0);
        let style = TextStyle::body(cursor.template());
        let y = cursor.y();
        draw_description(&mut cursor, "  \n ", 48.0, 400.0, style, ProseMode::Paragraph);
        assert_eq!(cursor.y(), y);
        assert!(cursor.canvas().pages()[0].ops.is_empty());
    }
}
