// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token guard for the resource API.
//!
//! Use the `Auth` extractor in handlers to require a valid token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal.username is the authenticated caller
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, Principal, TokenError};
use crate::state::AppState;

/// Extractor for bearer-authenticated principals.
///
/// Rejects with 401 when the `Authorization` header is missing, is not of
/// the form `Bearer <token>`, or carries a token the [`TokenService`]
/// does not accept.
///
/// [`TokenService`]: super::TokenService
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let principal = state.tokens.validate(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::debug!("rejected expired bearer token"),
                _ => tracing::debug!(error = %e, "rejected bearer token"),
            }
            AuthError::InvalidToken
        })?;

        Ok(Auth(principal))
    }
}
