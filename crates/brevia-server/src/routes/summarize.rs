//! Summarization routes — streaming relay from the remote model.

use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::warn;

use brevia_core::Error;
use brevia_extract::MIN_TEXT_CHARS;
use brevia_summarize::providers::{self, SummaryChunk};
use brevia_summarize::{build_prompt, SummarizeRequest};

use crate::routes::error_response;
use crate::state::AppState;

/// Bound on in-flight fragments between the relay task and the transport.
const RELAY_BUFFER: usize = 16;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/summarize/status", get(get_status))
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let resolved = state.llm.read().resolve_provider();
    Json(serde_json::json!({
        "llmAvailable": resolved.is_some(),
        "llmProvider": resolved.as_ref().map(|(p, _, _)| p.to_string()),
        "defaultModel": resolved.as_ref().map(|(_, m, _)| m.clone()),
    }))
}

/// POST /api/summarize — relays the model's token stream as one continuous
/// plain-text byte stream. Failures before the first byte return a
/// structured error; failures after it terminate the body in an error state.
async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Option<Json<serde_json::Value>>,
) -> Response {
    // Deployment precondition first: with no credential configured there is
    // no point spending validation on the request body
    let resolved = state.llm.read().resolve_provider();
    let Some((provider, model, api_key)) = resolved else {
        return error_response(&Error::ServiceUnavailable);
    };

    let Some(Json(body)) = body else {
        return error_response(&Error::InvalidInput("Invalid request body".into()));
    };
    let request: SummarizeRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(_) => return error_response(&Error::InvalidInput("Invalid request body".into())),
    };

    if request.text.trim().chars().count() < MIN_TEXT_CHARS {
        return error_response(&Error::InvalidInput(
            "Please provide at least 20 characters of text to summarize.".into(),
        ));
    }

    let prompt = build_prompt(request.style, request.length);
    let stream = match providers::open_summary_stream(
        &state.http,
        provider,
        &model,
        &api_key,
        &prompt,
        &request.text,
    )
    .await
    {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };

    // Producer/consumer relay: a task drains the provider stream into a
    // bounded channel, the response body drains the channel. Dropping the
    // sender ends the body; an Err item aborts it mid-transfer.
    let (tx, rx) = mpsc::channel::<io::Result<String>>(RELAY_BUFFER);
    tokio::spawn(async move {
        let mut stream = stream;
        while let Some(chunk) = stream.next().await {
            match chunk {
                SummaryChunk::Fragment(text) => {
                    // Send fails only once the client went away; stop relaying
                    if tx.send(Ok(text)).await.is_err() {
                        break;
                    }
                }
                SummaryChunk::Done => break,
                SummaryChunk::Failed(e) => {
                    warn!("Summary stream failed mid-relay: {}", e);
                    let _ = tx.send(Err(io::Error::other(e.to_string()))).await;
                    break;
                }
            }
        }
    });

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response()
}
