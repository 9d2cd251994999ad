//! Page/cursor manager: the single owner of the vertical write position.
//!
//! Every renderer takes `&mut RenderCursor`. `ensure_space` is the only place a page
//! break happens; text goes through `write_line`, which calls it first, so no
//! visible baseline ever lands below `page_height - bottom_margin`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::canvas::Canvas;
use crate::layout::font_metrics::{text_width, FontFace};
use crate::layout::template::{Rgb, TemplateConfig};

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Page dimensions and margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub bottom_margin: f32,
}

impl PageGeometry {
    pub fn for_size(size: PageSize) -> PageGeometry {
        let (width, height) = match size {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        };
        PageGeometry {
            width,
            height,
            margin: 48.0,
            bottom_margin: 48.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a visible baseline may occupy.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.bottom_margin
    }

    /// Vertical space available on a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::for_size(PageSize::A4)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Baseline position within a line box, as a fraction of its height.
const BASELINE_RATIO: f32 = 0.8;

/// Mutable layout state for one document.
pub struct RenderCursor {
    y: f32,
    geometry: PageGeometry,
    canvas: Canvas,
    template: TemplateConfig,
}

impl RenderCursor {
    pub fn new(geometry: PageGeometry, template: TemplateConfig) -> RenderCursor {
        RenderCursor {
            y: geometry.margin,
            geometry,
            canvas: Canvas::new(geometry.width, geometry.height),
            template,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Moves the cursor to an absolute position on the current page.
    /// Used by the header after drawing a full-bleed band.
    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn template(&self) -> &TemplateConfig {
        &self.template
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    pub fn left(&self) -> f32 {
        self.geometry.margin
    }

    pub fn content_width(&self) -> f32 {
        self.geometry.content_width()
    }

    /// Remaining vertical space above the bottom margin on the current page.
    pub fn available_space(&self) -> f32 {
        self.geometry.bottom_limit() - self.y
    }

    /// Starts a new page if fewer than `required` points remain. Returns whether it broke.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        if self.available_space() < required {
            debug!(
                page = self.page_count() + 1,
                required, available = self.available_space(),
                "Page break"
            );
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn advance(&mut self, amount: f32) {
        self.y += amount;
    }

    pub fn new_page(&mut self) {
        self.canvas.add_page();
        self.y = self.geometry.margin;
    }

    /// Baseline of a `line_height` box that starts at the cursor.
    pub fn baseline(&self, line_height: f32) -> f32 {
        self.y + line_height * BASELINE_RATIO
    }

    /// Writes one line of text inside a `line_height` box starting at the cursor,
    /// breaking the page first if the box does not fit, then advances past it.
    pub fn write_line(
        &mut self,
        x: f32,
        text: &str,
        face: FontFace,
        size: f32,
        color: Rgb,
        line_height: f32,
    ) {
        self.ensure_space(line_height);
        let baseline = self.baseline(line_height);
        debug_assert!(baseline <= self.geometry.bottom_limit() + 0.01);
        self.canvas.text(x, baseline, text, face, size, color);
        self.advance(line_height);
    }

    /// `write_line` horizontally centered on the page.
    pub fn write_centered(
        &mut self,
        text: &str,
        face: FontFace,
        size: f32,
        color: Rgb,
        line_height: f32,
    ) {
        let width = text_width(text, face, size);
        let x = ((self.geometry.width - width) / 2.0).max(self.geometry.margin);
        self.write_line(x, text, face, size, color, line_height);
    }

    /// Full-content-width horizontal rule at the cursor. Does not advance.
    pub fn rule(&mut self, width: f32, color: Rgb) {
        let left = self.left();
        let right = left + self.content_width();
        let y = self.y;
        self.canvas.line(left, y, right, y, width, color);
    }

    /// Consumes the cursor, handing the finished display list to assembly.
    pub fn finish(self) -> Canvas {
        self.canvas
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
