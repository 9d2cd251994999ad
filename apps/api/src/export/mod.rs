//! Export pipeline: layout, verification, metadata, encoding, in that order.
//!
//! Bytes exist only once every step has succeeded; any failure returns an
//! `ExportError` and nothing else.

pub mod handlers;

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::ExportError;
use crate::layout::canvas::{Canvas, DrawOp};
use crate::layout::{render_resume, PageGeometry, RenderOptions};
use crate::models::resume::ResumeRecord;
use crate::render::{default_filename, encode_pdf, sanitize_filename, DocumentMetadata};

/// Body of `POST /api/v1/export`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    pub resume: ResumeRecord,
    pub template_id: i64,
    /// Overrides `resume.jobDescription` for keyword injection.
    pub job_description: Option<String>,
    /// Download name; sanitized. Derived from the candidate name when absent.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub template_id: i64,
    pub geometry: PageGeometry,
    pub job_description: Option<String>,
    pub filename: Option<String>,
    /// Written to the Info dictionary when set. Leave unset for byte-identical output.
    pub creation_date: Option<DateTime<Utc>>,
}

/// A finished document.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Bytes,
    pub page_count: usize,
}

impl ExportedPdf {
    /// Writes the document into `dir` under its filename. The bytes go to a temporary
    /// file in the same directory that is renamed over the target, so readers never
    /// observe a half-written PDF.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let target = dir.join(&self.filename);
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&self.bytes)?;
        file.as_file().sync_all()?;
        file.persist(&target).map_err(|e| ExportError::Io(e.error))?;
        Ok(target)
    }
}

/// Runs the full pipeline for one résumé.
pub fn export_resume(
    record: &ResumeRecord,
    options: &ExportOptions,
) -> Result<ExportedPdf, ExportError> {
    let export_id = Uuid::new_v4();
    let span = info_span!("export", %export_id, template_id = options.template_id);
    let _guard = span.enter();

    let layout = render_resume(
        record,
        &RenderOptions {
            template_id: options.template_id,
            geometry: options.geometry,
            job_description: options.job_description.clone(),
        },
    );
    verify_layout(&layout.canvas, &options.geometry)?;

    let metadata = DocumentMetadata::for_resume(record, options.creation_date);
    let bytes = encode_pdf(&layout.canvas, &metadata)?;

    let filename = match options.filename.as_deref() {
        Some(name) if !name.trim().is_empty() => sanitize_filename(name),
        _ => default_filename(&record.personal.full_name, layout.template.id),
    };

    info!(
        template = layout.template.name,
        pages = layout.page_count(),
        bytes = bytes.len(),
        filename = %filename,
        "PDF exported"
    );

    Ok(ExportedPdf {
        filename,
        bytes: Bytes::from(bytes),
        page_count: layout.page_count(),
    })
}

/// Final check before encoding: no visible baseline below the bottom margin and no
/// empty page after the first.
fn verify_layout(canvas: &Canvas, geometry: &PageGeometry) -> Result<(), ExportError> {
    let limit = geometry.bottom_limit() + 0.01;
    for (index, page) in canvas.pages().iter().enumerate() {
        if index > 0 && page.ops.is_empty() {
            return Err(ExportError::Layout(format!("page {} is empty", index + 1)));
        }
        for op in &page.ops {
            if let DrawOp::Text { y, text, .. } = op {
                if *y > limit {
                    return Err(ExportError::Layout(format!(
                        "text '{text}' on page {} at y={y:.2} crosses the bottom margin",
                        index + 1
                    )));
                }
            }
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::FontFace;
    use crate::layout::template::Rgb;
    use crate::models::resume::{Experience, PersonalInfo};
    use chrono::TimeZone;

    fn jane_doe() -> ResumeRecord {
        ResumeRecord {
            personal: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                ..Default::default()
            },
            experience: vec![Experience {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_date: "2021-03".to_string(),
                end_date: "Present".to_string(),
                description: "Built systems".to_string(),
                ..Default::default()
            }],
            skills: vec!["Go".to_string(), "Rust".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_produces_loadable_single_page_pdf() {
        let pdf = export_resume(&jane_doe(), &ExportOptions::default()).unwrap();
        assert_eq!(pdf.page_count, 1);
        assert_eq!(pdf.filename, "Jane_Doe_Resume_Template1.pdf");
        let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_exported_text_is_extractable() {
        let pdf = export_resume(&jane_doe(), &ExportOptions::default()).unwrap();
        let text = pdf_extract::extract_text_from_mem(&pdf.bytes).unwrap();
        assert!(text.contains("Jane Doe"), "{text}");
        assert!(text.contains("Built systems"), "{text}");
    }

    #[test]
    fn test_export_is_byte_identical_with_fixed_date() {
        let options = ExportOptions {
            template_id: 3,
            creation_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()),
            ..Default::default()
        };
        let a = export_resume(&jane_doe(), &options).unwrap();
        let b = export_resume(&jane_doe(), &options).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_filename_override_is_sanitized() {
        let options = ExportOptions {
            filename: Some("../My CV".to_string()),
            template_id: 2,
            ..Default::default()
        };
        let pdf = export_resume(&jane_doe(), &options).unwrap();
        assert_eq!(pdf.filename, "My_CV.pdf");
    }

    #[test]
    fn test_template_number_in_default_filename() {
        let options = ExportOptions {
            template_id: 4,
            ..Default::default()
        };
        let pdf = export_resume(&jane_doe(), &options).unwrap();
        assert_eq!(pdf.filename, "Jane_Doe_Resume_Template5.pdf");

        let fallback = ExportOptions {
            template_id: 42,
            ..Default::default()
        };
        let pdf = export_resume(&jane_doe(), &fallback).unwrap();
        assert_eq!(pdf.filename, "Jane_Doe_Resume_Template1.pdf");
    }

    #[test]
    fn test_verify_layout_rejects_text_in_bottom_margin() {
        let geometry = PageGeometry::default();
        let mut canvas = Canvas::new(geometry.width, geometry.height);
        canvas.text(48.0, geometry.height - 10.0, "late", FontFace::Helvetica, 10.0, Rgb::BLACK);
        let err = verify_layout(&canvas, &geometry).unwrap_err();
        assert!(matches!(err, ExportError::Layout(_)));
    }

    #[test]
    fn test_verify_layout_rejects_trailing_empty_page() {
        let geometry = PageGeometry::default();
        let mut canvas = Canvas::new(geometry.width, geometry.height);
        canvas.text(48.0, 60.0, "one", FontFace::Helvetica, 10.0, Rgb::BLACK);
        canvas.add_page();
        assert!(verify_layout(&canvas, &geometry).is_err());
    }

    #[test]
    fn test_save_to_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = export_resume(&jane_doe(), &ExportOptions::default()).unwrap();
        let path = pdf.save_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Jane_Doe_Resume_Template1.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), pdf.bytes.to_vec());
        // Only the final file remains.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_to_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let pdf = export_resume(&jane_doe(), &ExportOptions::default()).unwrap();
        let err = pdf.save_to(&missing).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(!missing.exists());
    }
}
