use std::time::Duration;

use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hotel_concierge::errors::AppError;
use hotel_concierge::models::{UploadedDocument, WorkflowChatPayload, MAX_PDF_BYTES, PDF_MIME_TYPE};
use hotel_concierge::workflow::{HttpWorkflowClient, WorkflowClient};

fn payload(message: &str) -> WorkflowChatPayload {
    WorkflowChatPayload { message: message.to_string(), session_id: "user-session-1".to_string() }
}

#[tokio::test]
async fn unreachable_endpoint_is_classified() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpWorkflowClient::new(&format!("http://{addr}")).unwrap();
    let err = client.send_chat(&payload("hi")).await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamUnreachable { .. }), "got {err:?}");
}

#[tokio::test]
async fn timeout_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client =
        HttpWorkflowClient::with_timeouts(&server.uri(), Duration::from_millis(100), Duration::from_millis(100))
            .unwrap();
    let err = client.send_chat(&payload("hi")).await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamTimeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn upstream_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("webhook not registered"))
        .mount(&server)
        .await;

    let client = HttpWorkflowClient::new(&server.uri()).unwrap();
    let err = client.send_chat(&payload("hi")).await.unwrap_err();

    match err {
        AppError::UpstreamError { status, body, .. } => {
            assert_eq!(status, Some(404));
            assert_eq!(body, Some(json!("webhook not registered")));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn structured_workflow_failure_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "agent crashed" })))
        .mount(&server)
        .await;

    let client = HttpWorkflowClient::new(&server.uri()).unwrap();
    let err = client.send_chat(&payload("hi")).await.unwrap_err();

    assert!(matches!(err, AppError::UpstreamError { .. }), "got {err:?}");
    assert_eq!(err.details(), json!({ "error": "agent crashed", "details": null }));
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
        .mount(&server)
        .await;

    let client = HttpWorkflowClient::new(&server.uri()).unwrap();
    let err = client.send_chat(&payload("hi")).await.unwrap_err();

    match err {
        AppError::UpstreamError { message, .. } => assert!(message.starts_with("malformed workflow response")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn pdf_is_sent_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/upload-pdf-to-drive"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "drive-file-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpWorkflowClient::new(&server.uri()).unwrap();
    let doc = UploadedDocument::new("hotel.pdf", PDF_MIME_TYPE, Bytes::from_static(b"%PDF-1.4 test"));
    let ack = client.upload_document(&doc).await.unwrap();
    assert_eq!(ack, json!({ "id": "drive-file-1" }));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"data\""));
    assert!(body.contains("filename=\"hotel.pdf\""));
    assert!(body.to_lowercase().contains("content-type: application/pdf"));
    assert!(body.contains("%PDF-1.4 test"));
}

#[tokio::test]
async fn invalid_documents_never_leave_the_process() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = HttpWorkflowClient::new(&server.uri()).unwrap();

    let text = UploadedDocument::new("notes.txt", "text/plain", Bytes::from_static(b"hello"));
    assert!(matches!(client.upload_document(&text).await, Err(AppError::UnsupportedMediaType { .. })));

    let big = UploadedDocument::new("big.pdf", PDF_MIME_TYPE, Bytes::from(vec![b'x'; MAX_PDF_BYTES + 1]));
    assert!(matches!(client.upload_document(&big).await, Err(AppError::PayloadTooLarge { .. })));
}
