mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt; // for Router::oneshot
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{json_request, test_app, InMemoryStatsStore};
use hotel_concierge::workflow::HttpWorkflowClient;

async fn app_for(server: &MockServer) -> common::TestApp {
    let workflow = HttpWorkflowClient::new(&server.uri()).unwrap();
    test_app(Arc::new(workflow), InMemoryStatsStore::default(), None)
}

#[tokio::test]
async fn checkout_question_is_answered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(body_json(json!({ "message": "What time is checkout?", "sessionId": "default" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Checkout is at 11am." })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server).await;
    let resp = app
        .router
        .oneshot(json_request("POST", "/api/chat", &json!({ "message": "What time is checkout?" })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["response"], json!("Checkout is at 11am."));
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn message_is_trimmed_and_session_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(body_json(json!({ "message": "Do you have parking?", "sessionId": "user-session-7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Yes, valet parking." })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server).await;
    let resp = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/chat",
            &json!({ "message": "   Do you have parking?  ", "sessionId": "user-session-7" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_message_is_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let app = app_for(&server).await;
    for body in [json!({ "message": "   " }), json!({ "message": "" }), json!({ "sessionId": "s" })] {
        let resp = app.router.clone().oneshot(json_request("POST", "/api/chat", &body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = common::body_json(resp).await;
        assert_eq!(body["error"], json!("message is required"));
        assert_eq!(body["details"], json!({ "field": "message" }));
    }
}

#[tokio::test]
async fn unparseable_body_is_a_json_error_document() {
    let server = MockServer::start().await;
    let app = app_for(&server).await;

    let resp = app.router.oneshot(json_request("POST", "/api/chat", &json!({ "message": 42 }))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn upstream_error_yields_generic_failure_with_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Workflow could not be started" })))
        .mount(&server)
        .await;

    let app = app_for(&server).await;
    let resp = app.router.oneshot(json_request("POST", "/api/chat", &json!({ "message": "hi" }))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(resp).await;
    assert_eq!(body["error"], json!("Failed to get response from AI"));
    assert_eq!(body["details"], json!({ "message": "Workflow could not be started" }));
}

#[tokio::test]
async fn malformed_upstream_reply_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "wrong field" })))
        .mount(&server)
        .await;

    let app = app_for(&server).await;
    let resp = app.router.oneshot(json_request("POST", "/api/chat", &json!({ "message": "hi" }))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(resp).await;
    assert_eq!(body["error"], json!("Failed to get response from AI"));
    assert_eq!(body["details"], json!({ "output": "wrong field" }));
}

#[tokio::test]
async fn slow_upstream_times_out_within_bound() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "too late" }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let workflow =
        HttpWorkflowClient::with_timeouts(&server.uri(), Duration::from_millis(200), Duration::from_millis(200))
            .unwrap();
    let app = test_app(Arc::new(workflow), InMemoryStatsStore::default(), None);

    let started = Instant::now();
    let resp = app.router.oneshot(json_request("POST", "/api/chat", &json!({ "message": "hi" }))).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(resp).await;
    assert_eq!(body["error"], json!("Failed to get response from AI"));
    assert!(body["details"].as_str().unwrap().contains("did not answer"));
}
