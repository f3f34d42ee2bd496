//! Purchase and restock over HTTP.

use serde_json::{json, Value};

use crate::support::{create_sweet, register_and_login, spawn_app, sweet_payload};

#[tokio::test]
async fn purchase_defaults_to_one() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 5)).await;

    // No body at all: the quantity defaults.
    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweet"]["quantity"], 4);
}

#[tokio::test]
async fn purchase_with_explicit_quantity() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 5)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweet"]["quantity"], 2);
}

#[tokio::test]
async fn purchase_of_entire_stock_reaches_zero() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 5)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweet"]["quantity"], 0);
}

#[tokio::test]
async fn purchase_from_empty_stock_fails() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 0)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Sweet is out of stock. Only 0 units available"
    );
}

#[tokio::test]
async fn purchase_beyond_stock_fails() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 2)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Only 2 units available"));

    // Stock is untouched by the failed purchase.
    let resp = client
        .get(format!("{base}/api/sweets"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweets"][0]["quantity"], 2);
}

#[tokio::test]
async fn purchase_of_zero_quantity_is_invalid() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 0)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Quantity must be at least 1");
}

#[tokio::test]
async fn purchase_of_missing_sweet_is_not_found_even_with_bad_quantity() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;

    let resp = client
        .post(format!("{base}/api/sweets/no-such-id/purchase"))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Sweet not found");
}

#[tokio::test]
async fn purchase_requires_auth() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/sweets/some-id/purchase"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn purchase_quantity_above_cap_is_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &token, &sweet_payload("Barfi", 5)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/purchase",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 1001 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("1000"));
}

#[tokio::test]
async fn admin_restock_defaults_to_one() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let alice = register_and_login(&base, &client, "alice@example.com", "user").await;
    let admin = register_and_login(&base, &client, "admin@example.com", "admin").await;
    let sweet = create_sweet(&base, &client, &alice, &sweet_payload("Barfi", 1)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/restock",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweet"]["quantity"], 2);
}

#[tokio::test]
async fn admin_restock_with_quantity() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = register_and_login(&base, &client, "admin@example.com", "admin").await;
    let sweet = create_sweet(&base, &client, &admin, &sweet_payload("Barfi", 1)).await;

    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/restock",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&admin)
        .json(&json!({ "quantity": 500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweet"]["quantity"], 501);
}

#[tokio::test]
async fn restock_by_non_admin_is_forbidden() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let alice = register_and_login(&base, &client, "alice@example.com", "user").await;
    let sweet = create_sweet(&base, &client, &alice, &sweet_payload("Barfi", 1)).await;

    // Owning the sweet does not help: restock is admin-only.
    let resp = client
        .post(format!(
            "{base}/api/sweets/{}/restock",
            sweet["id"].as_str().unwrap()
        ))
        .bearer_auth(&alice)
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Forbidden");

    // Quantity unchanged.
    let resp = client
        .get(format!("{base}/api/sweets"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["sweets"][0]["quantity"], 1);
}

#[tokio::test]
async fn restock_of_missing_sweet_is_not_found() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = register_and_login(&base, &client, "admin@example.com", "admin").await;

    let resp = client
        .post(format!("{base}/api/sweets/no-such-id/restock"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
