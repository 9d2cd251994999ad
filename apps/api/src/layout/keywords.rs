//! ATS keyword injection: job-description terms written as 1pt white text in the
//! bottom margin of the final page. Invisible on screen, present in the text layer.
//!
//! Hidden text aimed at applicant-tracking systems is a questionable practice;
//! callers opt in by sending a job description.

use std::collections::HashSet;

use tracing::debug;

use crate::layout::cursor::RenderCursor;
use crate::layout::font_metrics::FontFace;
use crate::layout::text::{clean_text, wrap};

/// Minimum cleaned job-description length (characters) before anything is injected.
pub const MIN_JD_CHARS: usize = 50;
pub const MAX_KEYWORDS: usize = 150;
/// Tokens must be longer than this many characters.
const MIN_TOKEN_CHARS: usize = 3;

const KEYWORD_SIZE: f32 = 1.0;
const KEYWORD_LEADING: f32 = 1.2;
/// Inset from the bottom-margin band edges.
const BAND_INSET: f32 = 4.0;

/// Lowercased alphanumeric tokens longer than three characters, deduplicated in
/// first-seen order, capped at `MAX_KEYWORDS`. Short descriptions yield nothing.
pub fn extract_keywords(job_description: &str) -> Vec<String> {
    let cleaned = clean_text(job_description);
    if cleaned.chars().count() < MIN_JD_CHARS {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    cleaned
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|token| seen.insert(token.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

/// Writes the keywords into the final page's bottom margin, wrapped to the content
/// width. Lines that would leave the band are dropped. Returns the number of keywords
/// extracted.
pub fn inject_keywords(cursor: &mut RenderCursor, job_description: &str) -> usize {
    let keywords = extract_keywords(job_description);
    if keywords.is_empty() {
        return 0;
    }

    let geometry = *cursor.geometry();
    let left = cursor.left();
    let band_bottom = geometry.height - BAND_INSET;
    let mut baseline = geometry.bottom_limit() + BAND_INSET;

    let text = keywords.join(" ");
    for line in wrap(&text, geometry.content_width(), FontFace::Helvetica, KEYWORD_SIZE) {
        if baseline > band_bottom {
            break;
        }
        cursor.canvas_mut().hidden_text(left, baseline, &line, KEYWORD_SIZE);
        baseline += KEYWORD_LEADING;
    }

    debug!(count = keywords.len(), page = cursor.page_count(), "Injected ATS keywords");
    keywords.len()
}
