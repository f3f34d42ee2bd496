//! Shared harness: spawns the API on an ephemeral port and provides
//! register/create helpers used across the suites.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};

use sweetshop::auth::TokenCodec;
use sweetshop::http::{router, AppState};
use sweetshop::store::InMemoryStore;

/// Bind the API to port 0 and return its base URL.
pub async fn spawn_app() -> String {
    let state = Arc::new(AppState {
        store: InMemoryStore::new(),
        tokens: TokenCodec::new("test-secret", 3600),
    });
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Register an account and return its bearer token.
pub async fn register_and_login(base: &str, client: &Client, email: &str, role: &str) -> String {
    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": email, "password": "password123", "role": role }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    body["data"]["token"].as_str().unwrap().to_string()
}

/// A valid create-sweet payload.
pub fn sweet_payload(name: &str, quantity: u64) -> Value {
    json!({ "name": name, "category": "Milk", "price": 3.5, "quantity": quantity })
}

/// Create a sweet and return it from the response envelope.
pub async fn create_sweet(base: &str, client: &Client, token: &str, payload: &Value) -> Value {
    let resp = client
        .post(format!("{base}/api/sweets"))
        .bearer_auth(token)
        .json(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    body["data"]["sweet"].clone()
}
