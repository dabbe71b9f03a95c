// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! List endpoints.
//!
//! The collection routes are plain axum handlers. The per-id operations are
//! reached through the list dispatcher in [`super::resources`] and take the
//! principal and id as arguments.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::{
    auth::{Auth, Principal},
    error::{decode_json, ApiError},
    models::{validate_title, ListRequest, TodoList},
    state::AppState,
    storage::ListRepository,
};

fn parse_request(body: &[u8]) -> Result<ListRequest, ApiError> {
    let mut request: ListRequest = decode_json(body)?;
    request.title = validate_title(&request.title)
        .map_err(ApiError::bad_request)?
        .to_string();
    Ok(request)
}

#[utoipa::path(
    get,
    path = "/resource/lists",
    tag = "Lists",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [TodoList]))
)]
pub async fn list_lists(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<Vec<TodoList>>, ApiError> {
    let lists = ListRepository::new(&state.db)
        .list_by_owner(&principal)
        .await?;
    Ok(Json(lists))
}

#[utoipa::path(
    post,
    path = "/resource/lists",
    request_body = ListRequest,
    tag = "Lists",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = TodoList),
        (status = 400, description = "Malformed body or empty title")
    )
)]
pub async fn create_list(
    State(state): State<AppState>,
    Auth(principal): Auth,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoList>), ApiError> {
    let request = parse_request(&body)?;
    let list = ListRepository::new(&state.db)
        .create(&principal, &request.title, &request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(list)))
}

#[utoipa::path(
    get,
    path = "/resource/lists/{id}",
    params(("id" = i64, Path, description = "List id")),
    tag = "Lists",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = TodoList),
        (status = 404, description = "No such list for this user")
    )
)]
pub async fn get_list(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<Json<TodoList>, ApiError> {
    let list = ListRepository::new(&state.db).get(id, principal).await?;
    Ok(Json(list))
}

#[utoipa::path(
    put,
    path = "/resource/lists/{id}",
    params(("id" = i64, Path, description = "List id")),
    request_body = ListRequest,
    tag = "Lists",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = TodoList),
        (status = 400, description = "Malformed body or empty title"),
        (status = 404, description = "No such list for this user")
    )
)]
pub async fn update_list(
    state: &AppState,
    principal: &Principal,
    id: i64,
    body: &[u8],
) -> Result<Json<TodoList>, ApiError> {
    let request = parse_request(body)?;
    let list = ListRepository::new(&state.db)
        .update(id, principal, &request.title, &request.description)
        .await?;
    Ok(Json(list))
}

/// Deletes the list and every item in it.
#[utoipa::path(
    delete,
    path = "/resource/lists/{id}",
    params(("id" = i64, Path, description = "List id")),
    tag = "Lists",
    security(("bearer_auth" = [])),
    responses(
        (status = 204),
        (status = 404, description = "No such list for this user")
    )
)]
pub async fn delete_list(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<StatusCode, ApiError> {
    ListRepository::new(&state.db)
        .delete_cascade(id, principal)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CredentialRepository, Database};

    async fn test_state() -> (AppState, Principal) {
        let db = Database::in_memory().await.unwrap();
        CredentialRepository::new(&db)
            .create("alice", "digest")
            .await
            .unwrap();
        let state = AppState::new(db, b"lists-test-secret").unwrap();
        (state, Principal::new("alice"))
    }

    #[tokio::test]
    async fn create_list_success() {
        let (state, alice) = test_state().await;

        let (status, Json(list)) = create_list(
            State(state.clone()),
            Auth(alice.clone()),
            Bytes::from_static(br#"{"title":"  groceries ","description":"weekly"}"#),
        )
        .await
        .expect("list creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(list.title, "groceries");
        assert_eq!(list.owner, "alice");

        let Json(fetched) = get_list(&state, &alice, list.id).await.unwrap();
        assert_eq!(fetched, list);
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let (state, alice) = test_state().await;

        let err = create_list(
            State(state.clone()),
            Auth(alice.clone()),
            Bytes::from_static(br#"{"title":"   "}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let Json(lists) = list_lists(State(state), Auth(alice)).await.unwrap();
        assert!(lists.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let (state, alice) = test_state().await;
        let (_, Json(list)) = create_list(
            State(state.clone()),
            Auth(alice.clone()),
            Bytes::from_static(br#"{"title":"old"}"#),
        )
        .await
        .unwrap();

        let Json(updated) = update_list(&state, &alice, list.id, br#"{"title":"new"}"#)
            .await
            .unwrap();
        assert_eq!(updated.title, "new");
        assert!(updated.updated_at > list.created_at);

        let status = delete_list(&state, &alice, list.id).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = get_list(&state, &alice, list.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
