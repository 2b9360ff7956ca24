//! PDF serialization of a laid-out résumé, backed by `lopdf`.
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user space
//! is points from the bottom-left. Text uses a single unembedded base-14 font
//! with WinAnsiEncoding, so widths match `font_metrics` exactly.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::resume::builder::BuildError;
use crate::resume::font_metrics::{get_metrics, FontMetricTable};
use crate::resume::layout::{Align, DrawOp, LaidOutDocument, Page};

const PT_PER_MM: f32 = 72.0 / 25.4;
const RULE_WIDTH_PT: f32 = 0.567;
const FONT_RESOURCE: &str = "F1";

/// Turns a laid-out document into file bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, doc: &LaidOutDocument) -> Result<Vec<u8>, BuildError>;
}

/// Writes one PDF page per laid-out page.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    /// Written to the document information dictionary.
    pub title: Option<String>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, laid_out: &LaidOutDocument) -> Result<Vec<u8>, BuildError> {
        let metrics = get_metrics(&laid_out.font);
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => laid_out.font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        });

        let width_pt = laid_out.page_width_mm * PT_PER_MM;
        let height_pt = laid_out.page_height_mm * PT_PER_MM;

        let mut kids: Vec<Object> = Vec::with_capacity(laid_out.pages.len());
        for page in &laid_out.pages {
            let content = page_content(page, metrics, height_pt);
            let encoded = content.encode().map_err(|e| {
                BuildError::failed(format!("failed to encode page content: {e}"))
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count),
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt.into()),
                    Object::Real(height_pt.into()),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(concat!("folio-api ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(encode_win_ansi(title), StringFormat::Literal));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| BuildError::failed(format!("failed to serialize PDF: {e}")))?;
        Ok(bytes)
    }
}

fn page_content(page: &Page, metrics: &FontMetricTable, height_pt: f32) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size_pt,
                gray,
                align,
                text,
            } => {
                let left_mm = match align {
                    Align::Left => *x,
                    Align::Right => *x - metrics.measure_mm(text, *size_pt),
                };
                operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![FONT_RESOURCE.into(), real(*size_pt)]),
                    Operation::new("g", vec![real(*gray as f32 / 255.0)]),
                    Operation::new(
                        "Td",
                        vec![real(left_mm * PT_PER_MM), real(height_pt - *y * PT_PER_MM)],
                    ),
                    Operation::new(
                        "Tj",
                        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ]);
            }
            DrawOp::Rule { x1, y1, x2, y2 } => {
                operations.extend([
                    Operation::new("w", vec![real(RULE_WIDTH_PT)]),
                    Operation::new("G", vec![real(0.0)]),
                    Operation::new(
                        "m",
                        vec![real(*x1 * PT_PER_MM), real(height_pt - *y1 * PT_PER_MM)],
                    ),
                    Operation::new(
                        "l",
                        vec![real(*x2 * PT_PER_MM), real(height_pt - *y2 * PT_PER_MM)],
                    ),
                    Operation::new("S", vec![]),
                ]);
            }
        }
    }

    Content { operations }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Maps text onto WinAnsiEncoding. Characters outside the code page become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
