// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tower::ServiceExt;

use checklist_server::{
    api::router,
    auth::password::hash_password,
    models::ADMIN_USERNAME,
    state::AppState,
    storage::{CredentialRepository, Database},
};

pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const JWT_SECRET: &[u8] = b"integration-test-secret";

/// Response pieces the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// The full router over a fresh in-memory database with a seeded admin.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::in_memory()
            .await
            .expect("Failed to create test database");
        CredentialRepository::new(&db)
            .ensure(ADMIN_USERNAME, &hash_password(ADMIN_PASSWORD).unwrap())
            .await
            .expect("Failed to seed admin");

        let state = AppState::new(db, JWT_SECRET).expect("Failed to build state");
        Self {
            router: router(state),
        }
    }

    /// Send a request with an optional `Authorization` header and JSON body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        authorization: Option<String>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Request with a bearer token.
    pub async fn authed(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<Value>,
    ) -> TestResponse {
        self.send(method, path, Some(bearer(token)), body).await
    }

    /// Request with Basic credentials.
    pub async fn admin(
        &self,
        method: Method,
        path: &str,
        username: &str,
        password: &str,
        body: Option<Value>,
    ) -> TestResponse {
        self.send(method, path, Some(basic(username, password)), body)
            .await
    }

    /// Sign up and return the issued token.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/signup",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Create a list and return its id.
    pub async fn create_list(&self, token: &str, title: &str) -> i64 {
        let response = self
            .authed(
                Method::POST,
                "/resource/lists",
                token,
                Some(serde_json::json!({ "title": title })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }

    /// Create an item under a list and return its id.
    pub async fn create_item(&self, token: &str, list_id: i64, title: &str) -> i64 {
        let response = self
            .authed(
                Method::POST,
                &format!("/resource/lists/{list_id}/items/"),
                token,
                Some(serde_json::json!({ "title": title })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
