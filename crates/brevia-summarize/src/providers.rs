//! External LLM provider streaming.
//!
//! Opening the completion and relaying it are split in two: the HTTP request
//! is sent and its status checked *before* a stream is handed back, so
//! failures before the first byte surface as structured errors while
//! failures after it terminate the stream in an error state. OpenAI and Groq
//! share a wire format; Anthropic uses its own.

use std::pin::Pin;

use futures::Stream;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use tokio_stream::StreamExt;
use tracing::debug;

use brevia_core::{Error, Result};

use crate::prompt::{clamp_input, Prompt};
use crate::types::LlmProvider;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// Fixed sampling temperature: mild creative variation on paraphrase tasks
/// without destabilizing factual fidelity.
pub const TEMPERATURE: f64 = 0.7;

/// Boxed stream type for returning different relay implementations.
pub type FragmentStream = Pin<Box<dyn Stream<Item = SummaryChunk> + Send>>;

/// A single streamed text fragment, terminal marker, or mid-stream failure.
pub enum SummaryChunk {
    Fragment(String),
    Done,
    Failed(Error),
}

/// Open a streaming summarization call against the resolved provider.
///
/// The user text is clamped to the model input limit here, so every caller
/// gets the same safety cap. Errors returned from this function occurred
/// before any output byte; errors after that arrive as
/// [`SummaryChunk::Failed`] items on the stream.
pub async fn open_summary_stream(
    client: &Client,
    provider: LlmProvider,
    model: &str,
    api_key: &str,
    prompt: &Prompt,
    text: &str,
) -> Result<FragmentStream> {
    let text = clamp_input(text);
    debug!("Opening summary stream: provider={} model={}", provider, model);

    match provider {
        LlmProvider::OpenAi => {
            let response =
                send_openai_compat(client, OPENAI_URL, model, api_key, prompt, text).await?;
            Ok(Box::pin(relay_openai_compat(response)))
        }
        LlmProvider::Groq => {
            let response =
                send_openai_compat(client, GROQ_URL, model, api_key, prompt, text).await?;
            Ok(Box::pin(relay_openai_compat(response)))
        }
        LlmProvider::Anthropic => {
            let response = send_anthropic(client, model, api_key, prompt, text).await?;
            Ok(Box::pin(relay_anthropic(response)))
        }
    }
}

async fn send_openai_compat(
    client: &Client,
    url: &str,
    model: &str,
    api_key: &str,
    prompt: &Prompt,
    text: &str,
) -> Result<Response> {
    let body = json!({
        "model": model,
        "messages": [
            {"role": "system", "content": prompt.instruction},
            {"role": "user", "content": text},
        ],
        "temperature": TEMPERATURE,
        "max_tokens": prompt.max_output_tokens,
        "stream": true,
    });

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Request failed: {}", e)))?;

    check_status(response).await
}

async fn send_anthropic(
    client: &Client,
    model: &str,
    api_key: &str,
    prompt: &Prompt,
    text: &str,
) -> Result<Response> {
    let body = json!({
        "model": model,
        "system": prompt.instruction,
        "messages": [
            {"role": "user", "content": text},
        ],
        "temperature": TEMPERATURE,
        "max_tokens": prompt.max_output_tokens,
        "stream": true,
    });

    let response = client
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Request failed: {}", e)))?;

    check_status(response).await
}

/// Categorize a non-success response before any stream is opened.
///
/// 401/403 from the provider is an authentication failure; everything else
/// passes the remote message through.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::InvalidCredential);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream(remote_message(status, &body)))
}

fn remote_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("API error {}: {}", status, body))
}

/// Pop the next complete SSE line off the buffer, trimmed.
///
/// Lines are only taken once the terminating newline has arrived, so a
/// multi-byte character split across network reads is never decoded in
/// halves (UTF-8 continuation bytes can never equal `\n`).
fn take_line(buf: &mut Vec<u8>) -> Option<String> {
    let pos = buf.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = buf.drain(..=pos).collect();
    Some(String::from_utf8_lossy(&line).trim().to_string())
}

/// Extract the delta text from one OpenAI-format SSE data payload.
fn openai_delta(data: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
    let content = parsed["choices"][0]["delta"]["content"].as_str()?;
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

enum AnthropicEvent {
    Delta(String),
    Stop,
    Error(String),
    Other,
}

/// Classify one Anthropic-format SSE data payload.
fn anthropic_event(data: &str) -> AnthropicEvent {
    let parsed: serde_json::Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(_) => return AnthropicEvent::Other,
    };
    match parsed["type"].as_str() {
        Some("content_block_delta") => match parsed["delta"]["text"].as_str() {
            Some(text) if !text.is_empty() => AnthropicEvent::Delta(text.to_string()),
            _ => AnthropicEvent::Other,
        },
        Some("message_stop") => AnthropicEvent::Stop,
        Some("error") => AnthropicEvent::Error(
            parsed["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string(),
        ),
        _ => AnthropicEvent::Other,
    }
}

/// Relay an OpenAI-compatible SSE body as summary fragments.
fn relay_openai_compat(response: Response) -> impl Stream<Item = SummaryChunk> + Send + 'static {
    async_stream::stream! {
        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield SummaryChunk::Failed(Error::Upstream(format!("Stream read error: {}", e)));
                    return;
                }
            };
            buf.extend_from_slice(&bytes);

            while let Some(line) = take_line(&mut buf) {
                if line.is_empty() || line.starts_with(':') {
                    continue;
                }
                if let Some(data) = line.strip_prefix("data: ") {
                    if data.trim() == "[DONE]" {
                        yield SummaryChunk::Done;
                        return;
                    }
                    if let Some(text) = openai_delta(data) {
                        yield SummaryChunk::Fragment(text);
                    }
                }
            }
        }

        yield SummaryChunk::Done;
    }
}

/// Relay an Anthropic Messages SSE body as summary fragments.
fn relay_anthropic(response: Response) -> impl Stream<Item = SummaryChunk> + Send + 'static {
    async_stream::stream! {
        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield SummaryChunk::Failed(Error::Upstream(format!("Stream read error: {}", e)));
                    return;
                }
            };
            buf.extend_from_slice(&bytes);

            while let Some(line) = take_line(&mut buf) {
                if line.is_empty() || line.starts_with(':') {
                    continue;
                }
                if let Some(data) = line.strip_prefix("data: ") {
                    match anthropic_event(data) {
                        AnthropicEvent::Delta(text) => yield SummaryChunk::Fragment(text),
                        AnthropicEvent::Stop => {
                            yield SummaryChunk::Done;
                            return;
                        }
                        AnthropicEvent::Error(msg) => {
                            yield SummaryChunk::Failed(Error::Upstream(msg));
                            return;
                        }
                        AnthropicEvent::Other => {}
                    }
                }
            }
        }

        yield SummaryChunk::Done;
    }
}
