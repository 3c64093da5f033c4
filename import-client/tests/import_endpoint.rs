//! Integration tests against an in-process mock import endpoint.
//!
//! The mock mirrors the real endpoint's contract: bearer authentication,
//! a JSON array of `{"personId": <int>}` objects, 202 on acceptance, 400
//! on validation failures and 401 on bad credentials.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use common::config::ApiSettings;
use common::models::PersonRecord;
use db_access::PersonLookup;
use import_client::ImportClient;
use serde_json::json;
use tokio::sync::Mutex;

const TEST_TOKEN: &str = "test-token";
const MAX_BATCH_SIZE: usize = 100;

async fn import_handler(
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TEST_TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        );
    }

    let Some(items) = payload.as_array() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "payload must be an array"})),
        );
    };
    if items.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "payload must not be empty"})),
        );
    }
    if items.len() > MAX_BATCH_SIZE {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "batch exceeds the maximum size"})),
        );
    }
    for item in items {
        let person_id = item.get("personId").and_then(|v| v.as_i64());
        match person_id {
            Some(id) if id > 0 => {}
            _ => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "personId must be a positive integer"})),
                );
            }
        }
    }

    (
        StatusCode::ACCEPTED,
        Json(json!({"imported": items.len()})),
    )
}

async fn spawn_import_endpoint() -> String {
    let app = Router::new().route("/import", post(import_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: String, token: &str) -> ImportClient {
    ImportClient::new(ApiSettings {
        base_url,
        auth_token: token.to_string(),
    })
    .unwrap()
}

/// Test double that records which persons "exist" in the database.
struct FakeStore {
    ids: Mutex<HashSet<i64>>,
}

impl FakeStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            ids: Mutex::new(HashSet::new()),
        })
    }

    async fn insert(&self, person_id: i64) {
        self.ids.lock().await.insert(person_id);
    }
}

#[async_trait]
impl PersonLookup for FakeStore {
    async fn exists(&self, person_id: i64) -> bool {
        self.ids.lock().await.contains(&person_id)
    }

    async fn fetch_by_id(&self, person_id: i64) -> Option<PersonRecord> {
        self.exists(person_id).await.then(|| PersonRecord {
            person_id,
            first_name: None,
            last_name: None,
            email: None,
            created_at: None,
        })
    }
}

#[tokio::test]
async fn import_person_happy_path() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    let outcome = client.import_person(111).await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.json(), Some(json!({"imported": 1})));
}

#[tokio::test]
async fn import_accepts_multiple_valid_ids() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    for person_id in [111, 222, 333] {
        let outcome = client.import_person(person_id).await.unwrap();
        assert!(
            outcome.is_success(),
            "expected success for person {person_id}, got {}",
            outcome.status
        );
    }
}

#[tokio::test]
async fn invalid_person_ids_are_rejected() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    for person_id in [0, -1] {
        let outcome = client.import_person(person_id).await.unwrap();
        assert!(outcome.is_expected_error(400));
        assert!(!outcome.is_success());
    }
}

#[tokio::test]
async fn malformed_payloads_are_rejected() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    for payload in [json!([]), json!([{}]), json!({"personId": 111})] {
        let outcome = client.import_raw(&payload).await.unwrap();
        assert!(
            outcome.is_expected_error(400),
            "expected 400 for {payload}, got {}",
            outcome.status
        );
    }
}

#[tokio::test]
async fn oversized_batches_are_rejected() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    let at_limit = serde_json::Value::Array(
        (1..=MAX_BATCH_SIZE as i64)
            .map(|id| json!({"personId": id}))
            .collect(),
    );
    let outcome = client.import_raw(&at_limit).await.unwrap();
    assert!(outcome.is_success());

    let over_limit = serde_json::Value::Array(
        (1..=MAX_BATCH_SIZE as i64 + 1)
            .map(|id| json!({"personId": id}))
            .collect(),
    );
    let outcome = client.import_raw(&over_limit).await.unwrap();
    assert!(outcome.is_expected_error(400));
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn wrong_token_yields_401() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, "wrong-token");

    let outcome = client.import_person(111).await.unwrap();
    assert!(outcome.is_expected_error(401));
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn import_then_verify_through_an_attached_store() {
    let base = spawn_import_endpoint().await;
    let fake = FakeStore::new();
    let client = client_for(base, TEST_TOKEN).with_store(fake.clone());

    let outcome = client.import_person(111).await.unwrap();
    assert!(outcome.is_success());

    // The API call and the database row are only correlated by the
    // caller; simulate the backend landing the row.
    fake.insert(111).await;

    assert!(client.verify_imported(111).await);
    assert!(!client.verify_imported(999).await);
}

#[tokio::test]
async fn verification_without_a_store_degrades_to_false() {
    let base = spawn_import_endpoint().await;
    let client = client_for(base, TEST_TOKEN);

    assert!(client.store().is_none());
    assert!(!client.verify_imported(111).await);
}
