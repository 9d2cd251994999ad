//! Document info and download filename for an exported résumé.

use chrono::{DateTime, Utc};

use crate::layout::text::clean_text;
use crate::models::resume::{present_strings, ResumeRecord};

/// Skills beyond this count are left out of the Keywords entry.
pub const MAX_METADATA_KEYWORDS: usize = 25;
const CREATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));
const PRODUCER: &str = "lopdf";
const FALLBACK_FILENAME: &str = "Resume.pdf";

/// Entries of the PDF Info dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub creator: String,
    pub producer: String,
    /// Omitted from the file when `None`, which keeps output byte-identical across runs.
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    pub fn for_resume(record: &ResumeRecord, creation_date: Option<DateTime<Utc>>) -> Self {
        let name = clean_text(&record.personal.full_name);
        let title = if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("{name} - Resume")
        };
        let keywords = present_strings(&record.skills)
            .into_iter()
            .map(clean_text)
            .filter(|s| !s.is_empty())
            .take(MAX_METADATA_KEYWORDS)
            .collect::<Vec<_>>()
            .join(", ");

        DocumentMetadata {
            title,
            author: name,
            subject: clean_text(&record.personal.title),
            keywords,
            creator: CREATOR.to_string(),
            producer: PRODUCER.to_string(),
            creation_date,
        }
    }
}

/// PDF date string, e.g. `D:20240131120000Z`.
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// `"{fullName}_Resume_Template{n}.pdf"` with a 1-based template number, sanitized.
pub fn default_filename(full_name: &str, template_id: u8) -> String {
    let name = clean_text(full_name);
    if name.is_empty() {
        return sanitize_filename(&format!("Resume_Template{}", u16::from(template_id) + 1));
    }
    sanitize_filename(&format!("{name}_Resume_Template{}", u16::from(template_id) + 1))
}

/// Restricts a filename to `[A-Za-z0-9._-]`: whitespace and ASCII punctuation become
/// `_`, other characters are dropped, `_` runs collapse, and `.pdf` is ensured.
/// Anything that sanitizes to nothing becomes `Resume.pdf`.
pub fn sanitize_filename(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let mapped = match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '-' | '_' => c,
            c if c.is_whitespace() || c.is_ascii_punctuation() => '_',
            _ => continue,
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }

    let stem = out.trim_matches(|c| c == '_' || c == '.');
    let stem = if stem.to_ascii_lowercase().ends_with(".pdf") {
        &stem[..stem.len() - 4]
    } else {
        stem
    };
    let stem = stem.trim_matches(|c| c == '_' || c == '.');
    if stem.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    format!("{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_for_resume() {
        let mut record = ResumeRecord::default();
        record.personal.full_name = "Jane Doe".to_string();
        record.personal.title = "Staff Engineer".to_string();
        record.skills = (0..30).map(|i| format!("skill{i}")).collect();

        let meta = DocumentMetadata::for_resume(&record, None);
        assert_eq!(meta.title, "Jane Doe - Resume");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.subject, "Staff Engineer");
        assert_eq!(meta.keywords.split(", ").count(), MAX_METADATA_KEYWORDS);
        assert!(meta.keywords.starts_with("skill0, skill1"));
        assert_eq!(meta.producer, "lopdf");
    }

    #[test]
    fn test_metadata_without_name() {
        let meta = DocumentMetadata::for_resume(&ResumeRecord::default(), None);
        assert_eq!(meta.title, "Resume");
        assert!(meta.author.is_empty());
        assert!(meta.keywords.is_empty());
    }

    #[test]
    fn test_pdf_date_format() {
        let date = Utc.with_ymd_and_hms(2024, 1, 31, 12, 5, 9).unwrap();
        assert_eq!(pdf_date(&date), "D:20240131120509Z");
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename("Jane Doe", 0), "Jane_Doe_Resume_Template1.pdf");
        assert_eq!(default_filename("", 3), "Resume_Template4.pdf");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd.pdf");
        assert_eq!(sanitize_filename("My  CV (final).PDF"), "My_CV_final.pdf");
        assert_eq!(sanitize_filename("José Ñúñez"), "Jos_ez.pdf");
        assert_eq!(sanitize_filename("résumé.pdf"), "rsum.pdf");
        assert_eq!(sanitize_filename("  "), "Resume.pdf");
        assert_eq!(sanitize_filename("???"), "Resume.pdf");
    }
}
