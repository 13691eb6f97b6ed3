//! Summarization request types shared across server, client, and history.

use serde::{Deserialize, Serialize};

/// Rhetorical shape of the summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    Bullet,
    Paragraph,
    KeyPoints,
    Executive,
}

impl SummaryStyle {
    /// Human-readable label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::Bullet => "Bullet Points",
            SummaryStyle::Paragraph => "Paragraph",
            SummaryStyle::KeyPoints => "Key Points",
            SummaryStyle::Executive => "Executive Brief",
        }
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStyle::Bullet => write!(f, "bullet"),
            SummaryStyle::Paragraph => write!(f, "paragraph"),
            SummaryStyle::KeyPoints => write!(f, "key_points"),
            SummaryStyle::Executive => write!(f, "executive"),
        }
    }
}

impl std::str::FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bullet" => Ok(SummaryStyle::Bullet),
            "paragraph" => Ok(SummaryStyle::Paragraph),
            "key_points" => Ok(SummaryStyle::KeyPoints),
            "executive" => Ok(SummaryStyle::Executive),
            _ => Err(format!("unknown summary style: {}", s)),
        }
    }
}

/// Coarse target verbosity, mapped to both a sampling cap and a prose hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryLength::Short => "Short",
            SummaryLength::Medium => "Medium",
            SummaryLength::Long => "Long",
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryLength::Short => write!(f, "short"),
            SummaryLength::Medium => write!(f, "medium"),
            SummaryLength::Long => write!(f, "long"),
        }
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            _ => Err(format!("unknown summary length: {}", s)),
        }
    }
}

/// Incoming summarization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub style: SummaryStyle,
    pub length: SummaryLength,
}

/// LLM provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
    Groq,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::Groq => write!(f, "groq"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_wire_tokens() {
        let req: SummarizeRequest = serde_json::from_str(
            r#"{"text": "some input", "style": "key_points", "length": "short"}"#,
        )
        .unwrap();
        assert_eq!(req.style, SummaryStyle::KeyPoints);
        assert_eq!(req.length, SummaryLength::Short);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let result: Result<SummarizeRequest, _> = serde_json::from_str(
            r#"{"text": "some input", "style": "haiku", "length": "short"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_matches_display() {
        assert_eq!("key_points".parse::<SummaryStyle>().unwrap(), SummaryStyle::KeyPoints);
        assert_eq!(SummaryStyle::KeyPoints.to_string(), "key_points");
        assert!("verbose".parse::<SummaryLength>().is_err());
    }
}
