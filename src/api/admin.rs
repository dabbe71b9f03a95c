// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin endpoints for credential management.
//!
//! All routes require HTTP Basic credentials (see [`AdminAuth`]) and
//! provide:
//! - A listing of every credential, oldest first
//! - Credential creation through the signup hashing path
//! - Credential deletion, which also removes the user's lists and items
//!
//! The `admin` credential itself can never be deleted.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::accounts::register;
use crate::{
    auth::AdminAuth,
    error::{decode_json, ApiError},
    models::{CredentialsRequest, User, ADMIN_USERNAME},
    state::AppState,
    storage::CredentialRepository,
};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("basic_auth" = [])),
    responses(
        (status = 200, body = [User]),
        (status = 401, description = "Missing or invalid Basic credentials")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = CredentialRepository::new(&state.db).list_all().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CredentialsRequest,
    tag = "Admin",
    security(("basic_auth" = [])),
    responses(
        (status = 201, body = User),
        (status = 400, description = "Malformed body or empty username/password"),
        (status = 401, description = "Missing or invalid Basic credentials"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let request: CredentialsRequest = decode_json(&body)?;
    let user = register(&state, request).await?;

    tracing::info!(actor = %admin, username = %user.username, "admin created credential");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/admin/users/{username}",
    params(("username" = String, Path, description = "Username to delete")),
    tag = "Admin",
    security(("basic_auth" = [])),
    responses(
        (status = 204),
        (status = 400, description = "The admin credential cannot be deleted"),
        (status = 401, description = "Missing or invalid Basic credentials"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    if username == ADMIN_USERNAME {
        return Err(ApiError::bad_request("Cannot delete admin user"));
    }

    CredentialRepository::new(&state.db)
        .delete_cascade(&username)
        .await?;

    tracing::info!(actor = %admin, username = %username, "admin deleted credential");
    Ok(StatusCode::NO_CONTENT)
}
