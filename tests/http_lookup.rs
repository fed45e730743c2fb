//! End-to-end lookups against a live server on an ephemeral port.

use std::net::SocketAddr;

use serde_json::{json, Value};
use trustcaller::hashing::hash_phone;
use trustcaller::{server, LookupResult, LookupStatus, ServerConfig};

async fn spawn_server() -> SocketAddr {
    let config = ServerConfig {
        seed_demo: true,
        ..ServerConfig::default()
    };
    let app = server::app(server::open_store(&config).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn search(addr: SocketAddr, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{}/search-number", addr))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn verified_number_resolves() {
    let addr = spawn_server().await;

    let response = search(addr, json!({ "hashed_phone": hash_phone("+201234567890") })).await;
    assert_eq!(response.status(), 200);

    let result: LookupResult = response.json().await.unwrap();
    assert_eq!(result.full_name, "Dr. Ahmed Ali");
    assert_eq!(result.job_title, "Cardiologist (Verified)");
    assert_eq!(result.trust_score, 9.8);
    assert_eq!(result.status, LookupStatus::Verified);
}

#[tokio::test]
async fn unverified_number_is_not_found() {
    let addr = spawn_server().await;

    let response = search(addr, json!({ "hashed_phone": hash_phone("+201555555555") })).await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "User not found or unverified" }));
}

#[tokio::test]
async fn unknown_number_is_not_found() {
    let addr = spawn_server().await;

    let response = search(addr, json!({ "hashed_phone": "deadbeef" })).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn missing_hash_is_bad_request() {
    let addr = spawn_server().await;

    let response = search(addr, json!({})).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Missing hashed_phone" }));
}

#[tokio::test]
async fn repeated_lookups_are_identical() {
    let addr = spawn_server().await;
    let body = json!({ "hashed_phone": hash_phone("+201112223333") });

    let first: Value = search(addr, body.clone()).await.json().await.unwrap();
    let second: Value = search(addr, body).await.json().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first["full_name"], "Fast Delivery Co.");
}

#[tokio::test]
async fn concurrent_lookups() {
    let addr = spawn_server().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let phone = if i % 2 == 0 { "+201234567890" } else { "+201555555555" };
            let body = json!({ "hashed_phone": hash_phone(phone) });
            tokio::spawn(async move { search(addr, body).await.status().as_u16() })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let status = handle.await.unwrap();
        assert_eq!(status, if i % 2 == 0 { 200 } else { 404 });
    }
}

#[tokio::test]
async fn liveness() {
    let addr = spawn_server().await;

    let body: Value = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "TrustCaller API is Live");
}
