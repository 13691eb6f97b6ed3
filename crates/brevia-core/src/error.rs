//! Error types for Brevia.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No file provided")]
    NoFile,

    #[error("Unsupported file type. Use .txt, .pdf, or .docx")]
    UnsupportedFormat,

    #[error("Extracted text is too short to summarize.")]
    TooShort,

    #[error("{0}")]
    InvalidInput(String),

    #[error("No LLM provider configured. Set an API key in llm-config.json or the environment.")]
    ServiceUnavailable,

    #[error("Invalid API key. Check your provider credentials.")]
    InvalidCredential,

    #[error("{0}")]
    Upstream(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable category token used in wire-level error responses.
    pub fn category(&self) -> &'static str {
        match self {
            Error::NoFile => "NoFile",
            Error::UnsupportedFormat => "UnsupportedFormat",
            Error::TooShort => "TooShort",
            Error::InvalidInput(_) => "InvalidInput",
            Error::ServiceUnavailable => "ServiceUnavailable",
            Error::InvalidCredential => "InvalidCredential",
            Error::Upstream(_) => "UpstreamError",
            Error::Extraction(_) | Error::Io(_) | Error::Json(_) | Error::Internal(_) => {
                "InternalError"
            }
        }
    }

    /// Whether the condition is correctable by the caller (as opposed to a
    /// deployment or internal problem).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::NoFile | Error::UnsupportedFormat | Error::TooShort | Error::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
