// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup, login and token verification.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::{
    auth::{
        password::{hash_password_blocking, verify_password_blocking},
        Auth, AuthError, Principal,
    },
    error::{decode_json, ApiError},
    models::{CredentialsRequest, LoginResponse, User},
    state::AppState,
    storage::CredentialRepository,
};

fn validate_credentials(request: &CredentialsRequest) -> Result<(), ApiError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }
    Ok(())
}

/// Create a credential and issue a token for it.
///
/// Shares the hashing path with the admin create endpoint.
pub(crate) async fn register(
    state: &AppState,
    request: CredentialsRequest,
) -> Result<User, ApiError> {
    validate_credentials(&request)?;

    let digest = hash_password_blocking(request.password).await?;
    let user = CredentialRepository::new(&state.db)
        .create(&request.username, &digest)
        .await?;
    Ok(user)
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    tag = "Accounts",
    responses(
        (status = 201, body = LoginResponse),
        (status = 400, description = "Malformed body or empty username/password"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let request: CredentialsRequest = decode_json(&body)?;
    let user = register(&state, request).await?;
    let token = state.tokens.issue(&Principal::new(user.username.clone()))?;

    Ok((StatusCode::CREATED, Json(LoginResponse { token, user })))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    tag = "Accounts",
    responses(
        (status = 200, body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unknown username or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let request: CredentialsRequest = decode_json(&body)?;
    let repo = CredentialRepository::new(&state.db);

    let digest = repo.password_hash(&request.username).await?;
    let known = digest.is_some();
    if !verify_password_blocking(request.password, digest).await? {
        tracing::debug!(username = %request.username, known, "login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let user = repo.get(&request.username).await?;
    let token = state.tokens.issue(&Principal::new(user.username.clone()))?;
    Ok(Json(LoginResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/verify",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Principal),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn verify(Auth(principal): Auth) -> Json<Principal> {
    Json(principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    async fn test_state() -> AppState {
        let db = Database::in_memory().await.unwrap();
        AppState::new(db, b"accounts-test-secret").unwrap()
    }

    fn body(username: &str, password: &str) -> Bytes {
        Bytes::from(serde_json::json!({ "username": username, "password": password }).to_string())
    }

    #[tokio::test]
    async fn signup_then_login() {
        let state = test_state().await;

        let (status, Json(signed_up)) = signup(State(state.clone()), body("alice", "pw1"))
            .await
            .expect("signup succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(signed_up.user.username, "alice");
        assert_eq!(
            state.tokens.validate(&signed_up.token).unwrap().username,
            "alice"
        );

        let Json(logged_in) = login(State(state.clone()), body("alice", "pw1"))
            .await
            .expect("login succeeds");
        assert_eq!(logged_in.user, signed_up.user);
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let state = test_state().await;
        signup(State(state.clone()), body("alice", "pw1")).await.unwrap();

        let err = signup(State(state), body("alice", "other")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn signup_validates_input() {
        let state = test_state().await;

        for bad in [body("", "pw1"), body("alice", ""), Bytes::from_static(b"{")] {
            let err = signup(State(state.clone()), bad).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = test_state().await;
        signup(State(state.clone()), body("alice", "pw1")).await.unwrap();

        let wrong_password = login(State(state.clone()), body("alice", "nope"))
            .await
            .unwrap_err();
        let unknown_user = login(State(state), body("ghost", "pw1")).await.unwrap_err();

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status, unknown_user.status);
        assert_eq!(wrong_password.message, unknown_user.message);
    }
}
