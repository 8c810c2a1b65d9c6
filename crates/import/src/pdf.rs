use std::collections::BTreeMap;

use lopdf::{Document, Encoding, Object, ObjectId};
use mediaudit_core::{parse_lines, Bill};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to load PDF: {0}")]
    Load(#[from] lopdf::Error),
    #[error("PDF backend error: {0}")]
    Backend(String),
}

/// Text of a single page, line breaks preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    pub number: u32,
    pub text: String,
}

/// Source of per-page text for a PDF document.
pub trait PdfTextSource: Send + Sync {
    /// Pages in document order. A page without extractable text has empty `text`.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PdfPage>, PdfError>;

    fn backend_name(&self) -> &str;
}

/// Pure-Rust text extraction through `lopdf`.
///
/// Walks each page's content stream and starts a new line whenever the text
/// cursor moves vertically, so table rows come out one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextSource;

impl PdfTextSource for LopdfTextSource {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PdfPage>, PdfError> {
        let document = Document::load_mem(pdf_bytes)?;

        // get_pages() is keyed by 1-based page number, already in order.
        let pages = document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| {
                let text = match page_text(&document, page_id) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(page = number, "No extractable text: {e}");
                        String::new()
                    }
                };
                PdfPage { number, text }
            })
            .collect();
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

fn page_text(document: &Document, page_id: ObjectId) -> Result<String, lopdf::Error> {
    let encodings: BTreeMap<Vec<u8>, Encoding> = document
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(document).map(|enc| (name, enc)))
        .collect::<Result<_, _>>()?;
    let content = document.get_and_decode_page_content(page_id)?;

    let mut text = String::new();
    let mut encoding = None;
    let mut line_y = None;
    for op in &content.operations {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "BT" => line_y = None,
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Td" | "TD" => match operands.get(1).and_then(|dy| dy.as_float().ok()) {
                Some(dy) if dy != 0.0 => break_line(&mut text),
                _ => separate(&mut text),
            },
            "Tm" => {
                let y = operands.get(5).and_then(|y| y.as_float().ok());
                if line_y.is_some() && y != line_y {
                    break_line(&mut text);
                } else {
                    separate(&mut text);
                }
                line_y = y;
            }
            "T*" | "ET" => break_line(&mut text),
            "Tj" | "TJ" => show_text(&mut text, encoding, operands),
            // ' and " move to the next line before showing their string.
            "'" | "\"" => {
                break_line(&mut text);
                let shown = operands.len().saturating_sub(1);
                show_text(&mut text, encoding, &operands[shown..]);
            }
            _ => {}
        }
    }
    Ok(text)
}

fn show_text(text: &mut String, encoding: Option<&Encoding>, operands: &[Object]) {
    let Some(encoding) = encoding else {
        return;
    };
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                if let Ok(run) = Document::decode_text(encoding, bytes) {
                    text.push_str(&run);
                }
            }
            Object::Array(parts) => show_text(text, Some(encoding), parts),
            // Large negative kerning in a TJ array is a word gap.
            Object::Integer(_) | Object::Real(_) => {
                if operand.as_float().is_ok_and(|gap| gap < -100.0) {
                    separate(text);
                }
            }
            _ => {}
        }
    }
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn separate(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

/// Extract line items page by page, then line by line.
pub fn extract_bill(pdf_bytes: &[u8], source: &dyn PdfTextSource) -> Result<Bill, PdfError> {
    let pages = source.extract_pages(pdf_bytes)?;
    let scan = parse_lines(pages.iter().flat_map(|p| p.text.lines()));

    tracing::info!(
        backend = source.backend_name(),
        pages = pages.len(),
        items = scan.bill.len(),
        rejected = scan.rejected,
        "Extracted PDF bill"
    );
    Ok(scan.bill)
}
