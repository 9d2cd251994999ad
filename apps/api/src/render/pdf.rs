//! PDF writer: encodes a finished `Canvas` into PDF bytes with lopdf.
//!
//! Canvas coordinates are top-down; PDF user space is bottom-up, so every y is
//! flipped against the page height here and nowhere else. Text uses the standard
//! 14 Type1 fonts with WinAnsiEncoding; nothing is embedded.

use std::collections::BTreeSet;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::errors::ExportError;
use crate::layout::canvas::{Canvas, DrawOp, Paint};
use crate::layout::font_metrics::{encode_win_ansi, FontFace};
use crate::layout::template::Rgb;
use crate::render::metadata::{pdf_date, DocumentMetadata};

/// Bezier control-point factor for quarter-circle corners.
const KAPPA: f32 = 0.552_284_8;
/// Face used for hidden keyword text.
const HIDDEN_TEXT_FACE: FontFace = FontFace::Helvetica;

/// Encodes the canvas and metadata into a complete PDF file in memory.
pub fn encode_pdf(canvas: &Canvas, metadata: &DocumentMetadata) -> Result<Vec<u8>, ExportError> {
    let mut doc = build_document(canvas, metadata)?;
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(bytes)
}

fn build_document(canvas: &Canvas, metadata: &DocumentMetadata) -> Result<Document, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources_id = add_font_resources(&mut doc, canvas);
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        canvas.width.into(),
        canvas.height.into(),
    ];

    let mut kids = Vec::with_capacity(canvas.page_count());
    for page in canvas.pages() {
        let operations: Vec<Operation> = page
            .ops
            .iter()
            .flat_map(|op| encode_op(op, canvas.height))
            .collect();
        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(metadata));
    doc.trailer.set("Info", Object::Reference(info_id));

    Ok(doc)
}

/// One Type1 font dictionary per face the canvas uses, in a stable order.
fn add_font_resources(doc: &mut Document, canvas: &Canvas) -> ObjectId {
    let mut faces = BTreeSet::new();
    for op in canvas.pages().iter().flat_map(|p| p.ops.iter()) {
        match op {
            DrawOp::Text { face, .. } => {
                faces.insert(*face);
            }
            DrawOp::HiddenText { .. } => {
                faces.insert(HIDDEN_TEXT_FACE);
            }
            _ => {}
        }
    }

    let mut fonts = Dictionary::new();
    for face in faces {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), Object::Reference(font_id));
    }
    doc.add_object(dictionary! {
        "Font" => fonts,
    })
}

fn text_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

fn info_dictionary(metadata: &DocumentMetadata) -> Dictionary {
    let mut info = dictionary! {
        "Title" => text_string(&metadata.title),
        "Creator" => text_string(&metadata.creator),
        "Producer" => text_string(&metadata.producer),
    };
    for (key, value) in [
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
    ] {
        if !value.is_empty() {
            info.set(key, text_string(value));
        }
    }
    if let Some(date) = &metadata.creation_date {
        info.set("CreationDate", Object::string_literal(pdf_date(date)));
    }
    info
}

// ────────────────────────────────────────────────────────────────────────────
// Operation encoding
// ────────────────────────────────────────────────────────────────────────────

fn color_operands(color: Rgb) -> Vec<Object> {
    color.unit().iter().map(|c| Object::Real(*c)).collect()
}

fn text_ops(x: f32, y: f32, text: &str, face: FontFace, size: f32, color: Rgb) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", color_operands(color)),
        Operation::new(
            "Tf",
            vec![Object::Name(face.resource_name().into_bytes()), size.into()],
        ),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![text_string(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn encode_op(op: &DrawOp, page_height: f32) -> Vec<Operation> {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            face,
            size,
            color,
        } => text_ops(*x, page_height - y, text, *face, *size, *color),
        DrawOp::HiddenText { x, y, text, size } => {
            text_ops(*x, page_height - y, text, HIDDEN_TEXT_FACE, *size, Rgb::WHITE)
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("RG", color_operands(*color)),
            Operation::new("w", vec![(*width).into()]),
            Operation::new("m", vec![(*x1).into(), (page_height - y1).into()]),
            Operation::new("l", vec![(*x2).into(), (page_height - y2).into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            paint,
        } => rect_ops(*x, page_height - y - h, *w, *h, *radius, paint),
    }
}

/// `x`, `y` are the bottom-left corner in PDF space.
fn rect_ops(x: f32, y: f32, w: f32, h: f32, radius: f32, paint: &Paint) -> Vec<Operation> {
    let paint_op = match (paint.fill, paint.stroke) {
        (Some(_), Some(_)) => "B",
        (Some(_), None) => "f",
        (None, Some(_)) => "S",
        (None, None) => return Vec::new(),
    };

    let mut ops = vec![Operation::new("q", vec![])];
    if let Some(fill) = paint.fill {
        ops.push(Operation::new("rg", color_operands(fill)));
    }
    if let Some((stroke, width)) = paint.stroke {
        ops.push(Operation::new("RG", color_operands(stroke)));
        ops.push(Operation::new("w", vec![width.into()]));
    }

    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r > 0.0 {
        ops.extend(rounded_path(x, y, w, h, r));
    } else {
        ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
    }
    ops.push(Operation::new(paint_op, vec![]));
    ops.push(Operation::new("Q", vec![]));
    ops
}

fn rounded_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<Operation> {
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    let k = r * KAPPA;
    let point = |op: &str, coords: &[f32]| {
        Operation::new(op, coords.iter().map(|c| Object::Real(*c)).collect())
    };
    vec![
        point("m", &[x0 + r, y0]),
        point("l", &[x1 - r, y0]),
        point("c", &[x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r]),
        point("l", &[x1, y1 - r]),
        point("c", &[x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1]),
        point("l", &[x0 + r, y1]),
        point("c", &[x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r]),
        point("l", &[x0, y0 + r]),
        point("c", &[x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0]),
        point("h", &[]),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(595.28, 841.89);
        canvas.text(48.0, 60.0, "Jane Doe", FontFace::HelveticaBold, 22.0, Rgb::BLACK);
        canvas.line(48.0, 70.0, 547.28, 70.0, 1.0, Rgb(37, 99, 235));
        canvas.rounded_rect(48.0, 80.0, 40.0, 16.0, 8.0, Paint::fill(Rgb(219, 234, 254)));
        canvas.add_page();
        canvas.text(48.0, 60.0, "Page two", FontFace::TimesRoman, 10.0, Rgb::TEXT);
        canvas.hidden_text(48.0, 800.0, "kubernetes rust", 1.0);
        canvas
    }

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            title: "Jane Doe - Resume".to_string(),
            author: "Jane Doe".to_string(),
            subject: String::new(),
            keywords: "Go, Rust".to_string(),
            creator: "resume-pdf".to_string(),
            producer: "lopdf".to_string(),
            creation_date: None,
        }
    }

    #[test]
    fn test_encoded_pdf_loads_with_expected_pages() {
        let bytes = encode_pdf(&sample_canvas(), &metadata()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let canvas = sample_canvas();
        let a = encode_pdf(&canvas, &metadata()).unwrap();
        let b = encode_pdf(&canvas, &metadata()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_y_is_flipped() {
        let op = DrawOp::Text {
            x: 48.0,
            y: 60.0,
            text: "x".to_string(),
            face: FontFace::Helvetica,
            size: 10.0,
            color: Rgb::BLACK,
        };
        let ops = encode_op(&op, 800.0);
        let td = ops.iter().find(|o| o.operator == "Td").unwrap();
        assert!(matches!(td.operands[1], Object::Real(y) if (y - 740.0).abs() < 1e-3));
    }

    #[test]
    fn test_hidden_text_is_white_helvetica() {
        let op = DrawOp::HiddenText {
            x: 48.0,
            y: 800.0,
            text: "rust".to_string(),
            size: 1.0,
        };
        let ops = encode_op(&op, 841.89);
        let rg = ops.iter().find(|o| o.operator == "rg").unwrap();
        assert!(rg
            .operands
            .iter()
            .all(|c| matches!(c, Object::Real(v) if *v == 1.0)));
        let tf = ops.iter().find(|o| o.operator == "Tf").unwrap();
        assert!(matches!(&tf.operands[0], Object::Name(name) if name == b"F1"));
    }

    #[test]
    fn test_rounded_rect_uses_curves_and_sharp_rect_uses_re() {
        let rounded = rect_ops(0.0, 0.0, 40.0, 16.0, 8.0, &Paint::fill(Rgb::BLACK));
        assert_eq!(rounded.iter().filter(|o| o.operator == "c").count(), 4);
        let sharp = rect_ops(0.0, 0.0, 40.0, 16.0, 0.0, &Paint::fill(Rgb::BLACK));
        assert!(sharp.iter().any(|o| o.operator == "re"));
        assert_eq!(sharp.iter().filter(|o| o.operator == "f").count(), 1);
    }

    #[test]
    fn test_info_dictionary_skips_empty_entries() {
        let info = info_dictionary(&metadata());
        assert!(info.get(b"Title").is_ok());
        assert!(info.get(b"Keywords").is_ok());
        assert!(info.get(b"Subject").is_err());
        assert!(info.get(b"CreationDate").is_err());
    }
}
