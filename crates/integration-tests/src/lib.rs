//! Shared helpers for the Kiosk integration tests.
//!
//! Every test runs against a `wiremock::MockServer` standing in for the
//! store backend, with an in-memory key-value store standing in for the
//! durable client storage.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kiosk_storefront::Storefront;
use kiosk_storefront::api::ApiClient;
use kiosk_storefront::storage::{KeyValueStore, MemoryStore};

/// An API client pointed at the mock server.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid base URL (never in practice).
#[must_use]
pub fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri(), Duration::from_secs(5))
        .expect("mock server URI should be a valid base URL")
}

/// A storefront wired to the mock server and a fresh in-memory store.
pub async fn storefront(server: &MockServer) -> (Storefront, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = storefront_with_store(server, Arc::clone(&store)).await;
    (app, store)
}

/// A storefront reusing an existing store (to simulate a later run).
pub async fn storefront_with_store(server: &MockServer, store: Arc<MemoryStore>) -> Storefront {
    Storefront::with_parts(api_client(server), store as Arc<dyn KeyValueStore>).await
}

/// Backend-shaped product JSON.
#[must_use]
pub fn product_json(id: i64, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "image_url": null,
        "category_id": 1,
        "stock": 100,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

/// Backend-shaped cart item JSON (`CartItem` schema).
#[must_use]
pub fn cart_item_json(item_id: i64, product: &Value, quantity: u32) -> Value {
    json!({
        "id": item_id,
        "product_id": product["id"],
        "quantity": quantity,
        "product": product
    })
}

/// Backend-shaped cart snapshot JSON (`CartTotal` schema).
#[must_use]
pub fn cart_json(items: &[Value], total: f64) -> Value {
    json!({ "items": items, "total": total })
}

/// Backend-shaped user profile JSON.
#[must_use]
pub fn user_json(username: &str, is_admin: bool) -> Value {
    json!({
        "id": 1,
        "username": username,
        "is_admin": is_admin,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

/// Mount the login + profile mocks for a successful sign-in.
pub async fn mount_login(server: &MockServer, username: &str, is_admin: bool, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "username": username,
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(username, is_admin)))
        .mount(server)
        .await;
}

/// A FastAPI-style error body.
#[must_use]
pub fn detail_json(detail: &str) -> Value {
    json!({ "detail": detail })
}
