//! Brevia Extract — converts uploaded document bytes into normalized plain text.
//!
//! Dispatch is purely by declared format tag; there is no content sniffing.
//! All formats go through the same normalization pass afterwards.

pub mod docx;
pub mod format;
pub mod normalize;
pub mod pdf;

pub use format::DocumentFormat;
pub use normalize::{normalize, MAX_EXTRACT_CHARS, MIN_TEXT_CHARS};

use brevia_core::Result;

/// Extract normalized text from a document payload.
///
/// Returns the whitespace-collapsed, length-bounded text, or an error if the
/// payload cannot be read or the resulting text is too short to summarize.
/// No partial results are returned on failure.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    let raw = match format {
        DocumentFormat::Plain => String::from_utf8_lossy(bytes).into_owned(),
        DocumentFormat::Pdf => pdf::extract_pdf(bytes)?,
        DocumentFormat::Docx => docx::extract_docx(bytes)?,
    };
    normalize::normalize(&raw)
}
