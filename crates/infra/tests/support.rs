//! Shared helpers for blogc-infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use blogc_common::storage::{CredentialStore, MemoryStore};
use blogc_common::SessionStore;
use blogc_infra::ApiClient;
use serde_json::{json, Value};
use wiremock::{MockServer, Request};

/// Base URL with a path prefix, so resolution against the prefix is exercised.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/v1/", server.uri())
}

/// Memory store pre-populated with the given credentials.
pub fn seeded_store(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    if let Some(access) = access {
        store.set("access_token", access).expect("seed access token");
    }
    if let Some(refresh) = refresh {
        store.set("refresh_token", refresh).expect("seed refresh token");
    }
    store.set("user", &user_json(1, "ada").to_string()).expect("seed identity");
    store
}

/// Client against `server` sharing `store`.
pub fn client(server: &MockServer, store: Arc<MemoryStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url(server))
        .session(SessionStore::new(store))
        .build()
        .expect("api client")
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": format!("{username}@example.com"),
        "role": "user",
        "is_blog_admin": false
    })
}

pub fn post_json(id: i64, title: &str, published: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "author": user_json(1, "ada"),
        "category": {"id": 2, "name": "Rust", "title": "Rust", "slug": "rust"},
        "published": published,
        "created_at": "2025-08-15T21:15:00Z",
        "likes_count": 2,
        "comments_count": 1,
        "content": "body",
        "image": null
    })
}

pub fn comment_json(id: i64, post: i64, body: &str) -> Value {
    json!({
        "id": id,
        "post": post,
        "user": user_json(1, "ada"),
        "body": body,
        "created_at": "2025-08-16T08:00:00Z"
    })
}

/// Authorization header value of a recorded request.
pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Recorded requests whose path equals `path`.
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == path)
        .collect()
}
