//! PDF text extraction.
//!
//! Text is pulled page-by-page in page order and concatenated with a newline
//! between pages. No column or layout reconstruction is attempted; raw
//! reading-order token concatenation per page is accepted as correct.

use brevia_core::{Error, Result};
use lopdf::Document;
use tracing::debug;

/// Extract raw text from a PDF payload.
pub fn extract_pdf(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| Error::Extraction(format!("Failed to parse PDF: {}", e)))?;

    let pages = doc.get_pages();
    debug!("Extracting text from {} PDF pages", pages.len());

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = doc
            .extract_text(&[*page_number])
            .map_err(|e| Error::Extraction(format!("Failed to read page {}: {}", page_number, e)))?;
        page_texts.push(text);
    }

    Ok(page_texts.join("\n"))
}
