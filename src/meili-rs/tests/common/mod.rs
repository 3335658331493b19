//! Shared fixtures: one mock server and one client per test.

#![allow(dead_code)]

use meili_rs::Client;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const MASTER_KEY: &str = "masterKey";
pub const ENQUEUED_AT: &str = "2024-01-01T00:00:00Z";

pub struct Fixture {
    pub server: MockServer,
    pub client: Client,
}

pub async fn fixture() -> Fixture {
    init_tracing();
    let server = MockServer::start().await;
    let client = Client::new(server.uri(), Some(MASTER_KEY)).unwrap();
    Fixture { server, client }
}

pub async fn fixture_without_key() -> Fixture {
    init_tracing();
    let server = MockServer::start().await;
    let client = Client::new(server.uri(), None).unwrap();
    Fixture { server, client }
}

/// Route client logs to the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn task_info(task_uid: u64, index_uid: &str, kind: &str) -> Value {
    json!({
        "taskUid": task_uid,
        "indexUid": index_uid,
        "status": "enqueued",
        "type": kind,
        "enqueuedAt": ENQUEUED_AT
    })
}

pub fn task(uid: u64, status: &str) -> Value {
    json!({
        "uid": uid,
        "indexUid": "books",
        "status": status,
        "type": "documentAdditionOrUpdate",
        "enqueuedAt": ENQUEUED_AT
    })
}

pub fn failed_task(uid: u64) -> Value {
    json!({
        "uid": uid,
        "indexUid": "books",
        "status": "failed",
        "type": "documentAdditionOrUpdate",
        "error": {
            "message": "Document doesn't have a `id` attribute.",
            "code": "missing_document_id",
            "type": "invalid_request",
            "link": "https://docs.meilisearch.com/errors#missing_document_id"
        },
        "enqueuedAt": ENQUEUED_AT
    })
}

pub fn index_info(uid: &str) -> Value {
    json!({
        "uid": uid,
        "primaryKey": "id",
        "createdAt": ENQUEUED_AT,
        "updatedAt": ENQUEUED_AT
    })
}

pub fn error_body(message: &str, code: &str) -> Value {
    json!({
        "message": message,
        "code": code,
        "type": "invalid_request",
        "link": format!("https://docs.meilisearch.com/errors#{code}")
    })
}
