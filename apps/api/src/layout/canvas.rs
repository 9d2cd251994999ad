//! Display list produced by the layout passes and consumed by the PDF writer.
//!
//! Coordinates are in points with the origin at the top-left corner of the page and
//! `y` growing downwards. Text `y` is the baseline. The writer flips to PDF space.

use crate::layout::font_metrics::FontFace;
use crate::layout::template::Rgb;

/// Fill/stroke paint for closed shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Rgb>,
    pub stroke: Option<(Rgb, f32)>,
}

impl Paint {
    pub fn fill(color: Rgb) -> Paint {
        Paint {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn fill_and_stroke(fill: Rgb, stroke: Rgb, width: f32) -> Paint {
        Paint {
            fill: Some(fill),
            stroke: Some((stroke, width)),
        }
    }
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        face: FontFace,
        size: f32,
        color: Rgb,
    },
    /// ATS keyword text: drawn in the background colour at a near-zero size.
    HiddenText {
        x: f32,
        y: f32,
        text: String,
        size: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        paint: Paint,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl Page {
    /// Visible text runs on this page, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The drawing surface: a growable list of pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pages: Vec<Page>,
}

impl Canvas {
    /// A canvas always holds at least one page.
    pub fn new(width: f32, height: f32) -> Canvas {
        Canvas {
            width,
            height,
            pages: vec![Page::default()],
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current(&mut self) -> &mut Page {
        // `new` seeds one page and pages are never removed.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn push(&mut self, op: DrawOp) {
        self.current().ops.push(op);
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, face: FontFace, size: f32, color: Rgb) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            face,
            size,
            color,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint) {
        self.rounded_rect(x, y, w, h, 0.0, paint);
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, paint: Paint) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            paint,
        });
    }

    /// Hidden text always lands on the final page.
    pub fn hidden_text(&mut self, x: f32, y: f32, text: &str, size: f32) {
        self.push(DrawOp::HiddenText {
            x,
            y,
            text: text.to_string(),
            size,
        });
    }

    /// All visible text across pages, joined by newlines.
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .flat_map(|p| p.texts())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
