//! Supported document formats.

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Raw UTF-8 text.
    Plain,
    /// Paginated PDF document.
    Pdf,
    /// Word-processor XML container (.docx).
    Docx,
}

impl DocumentFormat {
    /// Map a file extension to a format tag. Anything unrecognized is
    /// unsupported, not guessed at.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Plain),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Format tag from a filename's extension.
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())?;
        Self::from_extension(ext)
    }
}
