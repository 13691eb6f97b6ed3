//! DOCX text extraction.
//!
//! A .docx file is a ZIP container; the document body lives in
//! `word/document.xml`. Only text content is kept; all formatting markup is
//! discarded. Paragraph ends become newlines so adjacent paragraphs cannot
//! fuse into one word before whitespace collapsing.

use std::io::{Cursor, Read};

use brevia_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Extract raw text from a DOCX payload.
pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| Error::Extraction(format!("Invalid DOCX container: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::Extraction(format!("Missing document body: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Extraction(format!("Failed to read document body: {}", e)))?;

    let mut reader = Reader::from_str(&xml);
    let mut out = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                if let Ok(text) = t.unescape() {
                    out.push_str(&text);
                }
            }
            // w:p is a paragraph, w:br a manual line break, w:tab a tab stop
            Ok(Event::End(e)) if e.local_name().as_ref() == b"p" => out.push('\n'),
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" => out.push('\n'),
                b"tab" => out.push(' '),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Extraction(format!("Malformed document XML: {}", e))),
            _ => {}
        }
    }

    Ok(out)
}
