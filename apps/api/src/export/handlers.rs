use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::{AppError, ExportError};
use crate::export::{export_resume, ExportOptions, ExportRequest, ExportedPdf};
use crate::layout::all_templates;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: u8,
    pub name: &'static str,
    pub header_style: crate::layout::template::HeaderStyle,
    pub font_family: &'static str,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        all_templates()
            .into_iter()
            .map(|t| TemplateSummary {
                id: t.id,
                name: t.name,
                header_style: t.header_style,
                font_family: t.font_family.label(),
            })
            .collect(),
    )
}

/// POST /api/v1/export
/// Layout and encoding are CPU-bound, so the pipeline runs on the blocking pool.
/// With `EXPORT_DIR` configured the document is also persisted there before it is returned.
pub async fn handle_export(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
        _ => AppError::Validation(e.body_text()),
    })?;

    let options = ExportOptions {
        template_id: req.template_id,
        geometry: state.page_geometry,
        job_description: req.job_description,
        filename: req.filename,
        creation_date: Some(chrono::Utc::now()),
    };
    let record = req.resume;
    let export_dir = state.config.export_dir.clone();

    let pdf = tokio::task::spawn_blocking(move || -> Result<ExportedPdf, ExportError> {
        let pdf = export_resume(&record, &options)?;
        if let Some(dir) = export_dir {
            let path = pdf.save_to(&dir)?;
            info!(path = %path.display(), "PDF persisted");
        }
        Ok(pdf)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid filename header: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::HeaderName::from_static("x-page-count"),
                HeaderValue::from(pdf.page_count),
            ),
        ],
        Body::from(pdf.bytes),
    )
        .into_response())
}
