//! Prompt construction: maps (style, length) to a model instruction and a
//! token budget.
//!
//! The sampling cap and the prose-level word target are deliberately
//! decoupled: the cap alone truncates mid-sentence, the hint alone lets the
//! model run long. Cueing both converges on the right brevity.

use crate::types::{SummaryLength, SummaryStyle};

/// Input text sent to the model is clamped to this many characters,
/// independent of the extraction-side cap.
pub const MAX_INPUT_CHARS: usize = 16_000;

/// A fully built model instruction plus its sampling budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub instruction: String,
    pub max_output_tokens: usize,
}

fn style_instruction(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Bullet => {
            "Summarize the following text as a clean, scannable list of bullet points \
             (use \u{2022} as the bullet character). Each bullet should be concise and informative."
        }
        SummaryStyle::Paragraph => {
            "Summarize the following text into a coherent, well-written paragraph \
             that captures the key ideas in flowing prose."
        }
        SummaryStyle::KeyPoints => {
            "Extract and list the key insights and takeaways from the following text \
             as numbered points. Focus on the most important and actionable information."
        }
        SummaryStyle::Executive => {
            "Write an executive brief / TL;DR for the following text. Start with a \
             one-sentence core message, then provide 3-4 critical points a \
             decision-maker needs to know. Be concise and direct."
        }
    }
}

fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => "Keep it very concise, around 80 words.",
        SummaryLength::Medium => "Aim for around 200 words.",
        SummaryLength::Long => "Provide a thorough summary of around 400 words.",
    }
}

fn token_budget(length: SummaryLength) -> usize {
    match length {
        SummaryLength::Short => 150,
        SummaryLength::Medium => 350,
        SummaryLength::Long => 650,
    }
}

/// Build the system instruction and token budget for a (style, length) pair.
/// Pure function; style and length are closed enums validated upstream.
pub fn build_prompt(style: SummaryStyle, length: SummaryLength) -> Prompt {
    let instruction = format!(
        "You are an expert summarizer. {} {}\nOnly return the summary itself \u{2014} \
         no preamble, no title, no \"Here is your summary:\" prefix.",
        style_instruction(style),
        length_instruction(length),
    );
    Prompt {
        instruction,
        max_output_tokens: token_budget(length),
    }
}

/// Clamp user text to [`MAX_INPUT_CHARS`] characters before it is sent to
/// the model.
pub fn clamp_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_budgets() {
        assert_eq!(build_prompt(SummaryStyle::Bullet, SummaryLength::Short).max_output_tokens, 150);
        assert_eq!(build_prompt(SummaryStyle::Bullet, SummaryLength::Medium).max_output_tokens, 350);
        assert_eq!(build_prompt(SummaryStyle::Bullet, SummaryLength::Long).max_output_tokens, 650);
    }

    #[test]
    fn test_instruction_carries_word_target_and_constraint() {
        let prompt = build_prompt(SummaryStyle::Executive, SummaryLength::Medium);
        assert!(prompt.instruction.contains("around 200 words"));
        assert!(prompt.instruction.contains("one-sentence core message"));
        assert!(prompt.instruction.contains("Only return the summary itself"));
    }

    #[test]
    fn test_deterministic() {
        let a = build_prompt(SummaryStyle::KeyPoints, SummaryLength::Long);
        let b = build_prompt(SummaryStyle::KeyPoints, SummaryLength::Long);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clamp_input() {
        let long = "x".repeat(MAX_INPUT_CHARS + 100);
        assert_eq!(clamp_input(&long).len(), MAX_INPUT_CHARS);
        assert_eq!(clamp_input("short"), "short");
    }
}
