// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP Basic guard for the admin surface.
//!
//! Independent of the bearer guard: it never accepts tokens, and every
//! rejection is the same 401 with a `WWW-Authenticate` challenge whether the
//! credentials were missing, the user was unknown or the password was
//! wrong, or the credentials belong to someone other than `admin`. The
//! specific reason is only logged, together with the caller's network origin.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64ct::{Base64, Encoding};

use super::{password::verify_password_blocking, AuthError, Principal};
use crate::models::ADMIN_USERNAME;
use crate::state::AppState;
use crate::storage::CredentialRepository;

/// Extractor for Basic-authenticated admin callers.
pub struct AdminAuth(pub Principal);

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let origin = client_origin(parts);

        let Some((username, password)) = basic_credentials(&parts.headers) else {
            tracing::warn!(origin = %origin, "admin auth failed: no basic credentials provided");
            return Err(AuthError::BasicAuthRequired);
        };

        let digest = CredentialRepository::new(&state.db)
            .password_hash(&username)
            .await
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        let known = digest.is_some();
        let matches = verify_password_blocking(password, digest)
            .await
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        if !matches {
            let reason = if known { "invalid password" } else { "user not found" };
            tracing::warn!(origin = %origin, username = %username, reason, "admin auth failed");
            return Err(AuthError::BasicAuthRequired);
        }

        if username != ADMIN_USERNAME {
            tracing::warn!(origin = %origin, username = %username, "admin auth failed: not the admin user");
            return Err(AuthError::BasicAuthRequired);
        }

        Ok(AdminAuth(Principal::new(username)))
    }
}

/// Decode `Authorization: Basic <base64(user:pass)>`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = Base64::decode_vec(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Peer address when the server was started with connect info.
fn client_origin(parts: &Parts) -> String {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::storage::Database;
    use axum::http::Request;

    fn encode(user: &str, pass: &str) -> String {
        format!("Basic {}", Base64::encode_string(format!("{user}:{pass}").as_bytes()))
    }

    fn parts_with(header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/admin/users");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        let mut parts = builder.body(()).unwrap().into_parts().0;
        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 4242))));
        parts
    }

    async fn state_with_admin() -> AppState {
        let db = Database::in_memory().await.unwrap();
        let repo = CredentialRepository::new(&db);
        repo.create("admin", &hash_password("hunter2").unwrap())
            .await
            .unwrap();
        repo.create("alice", &hash_password("pw1").unwrap())
            .await
            .unwrap();
        AppState::new(db, b"basic-test-secret").unwrap()
    }

    #[test]
    fn decodes_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, encode("admin", "a:b").parse().unwrap());
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "a:b".to_string()))
        );

        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);

        headers.insert(AUTHORIZATION, "Basic !!!".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);
    }

    #[tokio::test]
    async fn accepts_valid_credentials() {
        let state = state_with_admin().await;
        let mut parts = parts_with(Some(encode("admin", "hunter2")));

        let AdminAuth(principal) = AdminAuth::from_request_parts(&mut parts, &state)
            .await
            .expect("credentials accepted");
        assert_eq!(principal.username, "admin");
    }

    #[tokio::test]
    async fn every_failure_is_the_same_rejection() {
        let state = state_with_admin().await;
        let token = state.tokens.issue(&Principal::new("admin")).unwrap();

        for header in [
            None,
            Some(encode("admin", "wrong")),
            Some(encode("ghost", "hunter2")),
            Some(encode("alice", "pw1")),
            Some(format!("Bearer {token}")),
        ] {
            let mut parts = parts_with(header);
            let result = AdminAuth::from_request_parts(&mut parts, &state).await;
            assert!(matches!(result, Err(AuthError::BasicAuthRequired)));
        }
    }
}
