//! End-to-end consumer tests against an in-process streaming server.

use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use brevia_client::{CancelFlag, SummarizeClient};
use brevia_summarize::{SummarizeRequest, SummaryLength, SummaryStyle};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn request() -> SummarizeRequest {
    SummarizeRequest {
        text: "Short text for testing.".into(),
        style: SummaryStyle::Bullet,
        length: SummaryLength::Short,
    }
}

fn chunked_body(chunks: Vec<Bytes>) -> Body {
    Body::from_stream(futures::stream::iter(
        chunks.into_iter().map(Ok::<_, std::io::Error>),
    ))
}

#[tokio::test]
async fn test_fragments_concatenate_to_completed_text() {
    // Split "é" (0xC3 0xA9) across two chunks to exercise the incremental decoder
    let router = Router::new().route(
        "/api/summarize",
        post(|| async {
            chunked_body(vec![
                Bytes::from_static(b"r\xC3"),
                Bytes::from_static(b"\xA9sum\xC3\xA9 "),
                Bytes::from_static(b"of the document"),
            ])
        }),
    );
    let base = serve(router).await;

    let fragments = Arc::new(Mutex::new(Vec::<String>::new()));
    let completed = Arc::new(Mutex::new(None::<String>));

    let client = SummarizeClient::new(&base);
    client
        .consume(
            &request(),
            &CancelFlag::new(),
            |f| fragments.lock().unwrap().push(f.to_string()),
            |full| *completed.lock().unwrap() = Some(full),
            |e| panic!("unexpected error: {}", e),
        )
        .await;

    let full = completed.lock().unwrap().clone().expect("on_complete fired");
    assert_eq!(full, "r\u{e9}sum\u{e9} of the document");
    assert_eq!(fragments.lock().unwrap().concat(), full);
    // No fragment was delivered as broken halves of a character
    for fragment in fragments.lock().unwrap().iter() {
        assert!(!fragment.contains('\u{FFFD}'));
    }
}

#[tokio::test]
async fn test_pre_stream_error_surfaced_verbatim() {
    let router = Router::new().route(
        "/api/summarize",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Please provide at least 20 characters of text to summarize.",
                    "category": "InvalidInput",
                })),
            )
        }),
    );
    let base = serve(router).await;

    let errored = Arc::new(Mutex::new(None::<String>));
    let client = SummarizeClient::new(&base);
    client
        .consume(
            &request(),
            &CancelFlag::new(),
            |_| panic!("no fragments expected"),
            |_| panic!("on_complete must not fire"),
            |e| *errored.lock().unwrap() = Some(e),
        )
        .await;

    assert_eq!(
        errored.lock().unwrap().clone().unwrap(),
        "Please provide at least 20 characters of text to summarize."
    );
}

#[tokio::test]
async fn test_mid_stream_failure_calls_on_error_only() {
    let router = Router::new().route(
        "/api/summarize",
        post(|| async {
            Body::from_stream(futures::stream::iter(vec![
                Ok(Bytes::from_static(b"partial summary ")),
                Err(std::io::Error::other("upstream died")),
            ]))
            .into_response()
        }),
    );
    let base = serve(router).await;

    let fragments = Arc::new(Mutex::new(Vec::<String>::new()));
    let errored = Arc::new(Mutex::new(None::<String>));

    let client = SummarizeClient::new(&base);
    client
        .consume(
            &request(),
            &CancelFlag::new(),
            |f| fragments.lock().unwrap().push(f.to_string()),
            |_| panic!("on_complete must not fire after mid-stream failure"),
            |e| *errored.lock().unwrap() = Some(e),
        )
        .await;

    assert!(errored.lock().unwrap().is_some());
    // Whatever arrived before the failure was delivered, but is unreliable
    assert_eq!(fragments.lock().unwrap().concat(), "partial summary ");
}

#[tokio::test]
async fn test_cancel_suppresses_fragments_but_reads_to_end() {
    let router = Router::new().route(
        "/api/summarize",
        post(|| async {
            chunked_body(vec![
                Bytes::from_static(b"you should "),
                Bytes::from_static(b"not see this"),
            ])
        }),
    );
    let base = serve(router).await;

    let cancel = CancelFlag::new();
    cancel.cancel();

    let completed = Arc::new(Mutex::new(None::<String>));
    let client = SummarizeClient::new(&base);
    client
        .consume(
            &request(),
            &cancel,
            |_| panic!("fragments must be suppressed after cancellation"),
            |full| *completed.lock().unwrap() = Some(full),
            |e| panic!("unexpected error: {}", e),
        )
        .await;

    // The read loop still ran to completion; the caller just ignores it
    assert_eq!(
        completed.lock().unwrap().clone().unwrap(),
        "you should not see this"
    );
}

#[tokio::test]
async fn test_unreachable_server_reports_connectivity_error() {
    // Bind a port, then drop the listener so the connection is refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SummarizeClient::new(format!("http://{}", addr));
    let errored = Arc::new(Mutex::new(None::<String>));

    client
        .consume(
            &request(),
            &CancelFlag::new(),
            |_| panic!("no fragments expected"),
            |_| panic!("on_complete must not fire"),
            |e| *errored.lock().unwrap() = Some(e),
        )
        .await;

    let message = errored.lock().unwrap().clone().unwrap();
    assert!(message.contains("Failed to connect to the server"));
}
