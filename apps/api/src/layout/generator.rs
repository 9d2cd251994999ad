//! Layout pipeline: runs every renderer over one cursor, top to bottom.
//!
//! Flow: resolve template → header → summary → experience → projects →
//!       education → skills → extras → keyword injection → finished canvas.
//!
//! Pure and synchronous; callers on the async runtime wrap it in `spawn_blocking`.

use tracing::{debug, info};

use crate::layout::canvas::Canvas;
use crate::layout::cursor::{PageGeometry, RenderCursor};
use crate::layout::header::render_header;
use crate::layout::keywords::inject_keywords;
use crate::layout::sections::{
    render_education, render_experience, render_extras, render_projects, render_skills,
    render_summary,
};
use crate::layout::template::{resolve_template, TemplateConfig};
use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Raw template id; unknown ids fall back to template 0.
    pub template_id: i64,
    pub geometry: PageGeometry,
    /// Overrides `ResumeRecord::job_description` when set.
    pub job_description: Option<String>,
}

/// A finished layout, ready for PDF encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayout {
    pub canvas: Canvas,
    pub template: TemplateConfig,
}

impl RenderedLayout {
    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }
}

pub fn render_resume(record: &ResumeRecord, options: &RenderOptions) -> RenderedLayout {
    let template = resolve_template(options.template_id);
    let mut cursor = RenderCursor::new(options.geometry, template.clone());

    render_header(&mut cursor, &record.personal);

    run_section(&mut cursor, "summary", |c| render_summary(c, &record.personal));
    run_section(&mut cursor, "experience", |c| render_experience(c, &record.experience));
    run_section(&mut cursor, "projects", |c| render_projects(c, &record.projects));
    run_section(&mut cursor, "education", |c| render_education(c, &record.education));
    run_section(&mut cursor, "skills", |c| render_skills(c, &record.skills));
    run_section(&mut cursor, "extras", |c| {
        render_extras(c, &record.certifications, &record.languages, &record.interests)
    });

    let job_description = options
        .job_description
        .as_deref()
        .unwrap_or(&record.job_description);
    let keywords = inject_keywords(&mut cursor, job_description);

    let canvas = cursor.finish();
    info!(
        template = template.name,
        pages = canvas.page_count(),
        keywords,
        "Layout complete"
    );
    RenderedLayout { canvas, template }
}

fn run_section(cursor: &mut RenderCursor, name: &str, render: impl FnOnce(&mut RenderCursor)) {
    let page_before = cursor.page_count();
    render(cursor);
    if cursor.page_count() > page_before {
        debug!(section = name, pages = cursor.page_count(), "Section crossed a page boundary");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
