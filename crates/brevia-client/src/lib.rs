//! Brevia Client — consumes the summarization byte stream.
//!
//! The consumer runs cooperatively on the caller's execution context: it
//! reads chunks until end-of-stream, decodes them incrementally, and fires
//! the caller's callbacks in arrival order. Completion and failure are
//! mutually exclusive and each signaled exactly once.

pub mod decode;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_stream::StreamExt;
use tracing::debug;

use brevia_summarize::SummarizeRequest;
use decode::Utf8Decoder;

/// Cooperative cancellation: stops fragment delivery without cancelling the
/// underlying read loop or reclaiming the transport.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// HTTP client for a Brevia server.
pub struct SummarizeClient {
    base_url: String,
    http: reqwest::Client,
}

impl SummarizeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Stream a summary for `request`, delivering decoded fragments as they
    /// arrive.
    ///
    /// `on_fragment` fires synchronously for every non-empty decoded
    /// increment, in arrival order. On clean end-of-stream `on_complete`
    /// receives the concatenation of all fragments, exactly once. On any
    /// failure `on_error` fires exactly once instead, and partial text must
    /// be treated as unreliable. A set `cancel` flag suppresses further
    /// `on_fragment` calls; accumulation and completion still run so the
    /// caller can ignore them.
    pub async fn consume<F, C, E>(
        &self,
        request: &SummarizeRequest,
        cancel: &CancelFlag,
        mut on_fragment: F,
        on_complete: C,
        on_error: E,
    ) where
        F: FnMut(&str),
        C: FnOnce(String),
        E: FnOnce(String),
    {
        let url = format!("{}/api/summarize", self.base_url);

        let response = match self.http.post(&url).json(request).send().await {
            Ok(r) => r,
            Err(e) => {
                on_error(format!("Failed to connect to the server: {}", e));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            // Surface the server's structured message verbatim when present
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("Server error: {}", status));
            on_error(message);
            return;
        }

        let mut stream = response.bytes_stream();
        let mut decoder = Utf8Decoder::new();
        let mut full_text = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    debug!("Summary stream failed mid-read: {}", e);
                    on_error(format!("Stream read error: {}", e));
                    return;
                }
            };

            let decoded = decoder.feed(&bytes);
            if decoded.is_empty() {
                continue;
            }
            full_text.push_str(&decoded);
            if !cancel.is_cancelled() {
                on_fragment(&decoded);
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            full_text.push_str(&tail);
            if !cancel.is_cancelled() {
                on_fragment(&tail);
            }
        }

        on_complete(full_text);
    }
}

/// Word count of a text, splitting on whitespace.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in minutes, at 200 words per minute.
pub fn estimate_reading_time(word_count: usize) -> usize {
    word_count.div_ceil(200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("one two  three\nfour"), 4);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_estimate_reading_time() {
        assert_eq!(estimate_reading_time(0), 0);
        assert_eq!(estimate_reading_time(199), 1);
        assert_eq!(estimate_reading_time(201), 2);
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        let shared = flag.clone();
        shared.cancel();
        assert!(flag.is_cancelled());
    }
}
