#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt as _;
use serde_json::Value;

use hotel_concierge::build_router;
use hotel_concierge::config::GoogleOAuthConfig;
use hotel_concierge::db::credential_repository::CredentialStore;
use hotel_concierge::db::stats_repository::{StatsStore, UNCATEGORIZED};
use hotel_concierge::errors::AppError;
use hotel_concierge::models::{CategoryCount, OAuthCredential};
use hotel_concierge::state::AppState;
use hotel_concierge::workflow::WorkflowClient;

pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Stored chat messages as `(session_id, category)` pairs.
#[derive(Default)]
pub struct InMemoryStatsStore {
    pub messages: Vec<(String, Option<String>)>,
    pub unavailable: bool,
}

impl InMemoryStatsStore {
    pub fn with_messages(messages: &[(&str, Option<&str>)]) -> Self {
        Self {
            messages: messages
                .iter()
                .map(|(session, category)| (session.to_string(), category.map(String::from)))
                .collect(),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self { messages: Vec::new(), unavailable: true }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            Err(AppError::Unexpected("connection to server at 127.0.0.1:5432 refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn count_distinct_sessions(&self) -> Result<u64, AppError> {
        self.check()?;
        Ok(self.messages.iter().map(|(s, _)| s.as_str()).collect::<HashSet<_>>().len() as u64)
    }

    async fn count_messages(&self) -> Result<u64, AppError> {
        self.check()?;
        Ok(self.messages.len() as u64)
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError> {
        self.check()?;
        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for (_, category) in &self.messages {
            let key = category.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
            *buckets.entry(key).or_default() += 1;
        }
        let mut counts: Vec<CategoryCount> =
            buckets.into_iter().map(|(category, count)| CategoryCount { category, count }).collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
        Ok(counts)
    }

    async fn server_time(&self) -> Result<DateTime<Utc>, AppError> {
        self.check()?;
        Ok(Utc::now())
    }
}

#[derive(Default)]
pub struct InMemoryCredentials {
    pub records: Mutex<HashMap<String, OAuthCredential>>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn upsert(&self, credential: &OAuthCredential) -> Result<(), AppError> {
        self.records.lock().unwrap().insert(credential.provider.clone(), credential.clone());
        Ok(())
    }

    async fn find(&self, provider: &str) -> Result<Option<OAuthCredential>, AppError> {
        Ok(self.records.lock().unwrap().get(provider).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub credentials: Arc<InMemoryCredentials>,
}

pub fn test_app(
    workflow: Arc<dyn WorkflowClient>,
    store: InMemoryStatsStore,
    google: Option<GoogleOAuthConfig>,
) -> TestApp {
    let credentials = Arc::new(InMemoryCredentials::default());
    let state = AppState::new(workflow, Arc::new(store), credentials.clone(), google);
    let router = build_router(state, &[TEST_ORIGIN.to_string()]);
    TestApp { router, credentials }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub const BOUNDARY: &str = "hotel-concierge-test-boundary";

/// Single-file multipart body.
pub fn multipart_request(uri: &str, field: &str, file_name: &str, content_type: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
