//! Live server tests
//!
//! Expect a server on localhost:3000; run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api/v1";

/// Unique per run so repeated runs against one database do not collide
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Helper to sign up a user and log them in
async fn get_auth_token(client: &Client, username: &str, role: &str) -> String {
    let credentials = json!({
        "username": username,
        "password": "secret",
        "role": role
    });

    client
        .post(format!("{}/signup", BASE_URL))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to send signup request");

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();
    let username = unique("member");
    let token = get_auth_token(&client, &username, "member").await;

    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "username": unique("ghost"),
            "password": "wrong",
            "role": "member"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_add_borrow_return_delete_book() {
    let client = Client::new();
    let librarian = get_auth_token(&client, &unique("librarian"), "librarian").await;
    let member = get_auth_token(&client, &unique("member"), "member").await;
    let book_id = unique("book");

    let response = client
        .post(format!("{}/addbook", BASE_URL))
        .bearer_auth(&librarian)
        .json(&json!({ "bookId": book_id, "title": "Test Book" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    for path in ["borrowBook", "returnBook"] {
        let response = client
            .put(format!("{}/{}", BASE_URL, path))
            .bearer_auth(&member)
            .json(&json!({ "bookId": book_id }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);
    }

    let response = client
        .delete(format!("{}/deletebook", BASE_URL))
        .bearer_auth(&librarian)
        .json(&json!({ "bookId": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_librarian_dashboard() {
    let client = Client::new();
    let token = get_auth_token(&client, &unique("librarian"), "librarian").await;

    let response = client
        .get(format!("{}/librarian", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_array());
    assert!(body["members"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/librarian", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
