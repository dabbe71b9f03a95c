// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Item endpoints, all reached through the path dispatchers.

use axum::{http::StatusCode, Json};

use crate::{
    auth::Principal,
    error::{decode_json, ApiError},
    models::{validate_title, Item, ItemRequest},
    state::AppState,
    storage::ItemRepository,
};

fn parse_request(body: &[u8]) -> Result<ItemRequest, ApiError> {
    let mut request: ItemRequest = decode_json(body)?;
    request.title = validate_title(&request.title)
        .map_err(ApiError::bad_request)?
        .to_string();
    Ok(request)
}

#[utoipa::path(
    get,
    path = "/resource/lists/{id}/items",
    params(("id" = i64, Path, description = "List id")),
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = [Item]),
        (status = 404, description = "No such list for this user")
    )
)]
pub async fn list_items(
    state: &AppState,
    principal: &Principal,
    list_id: i64,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = ItemRepository::new(&state.db)
        .list_by_list(list_id, principal)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/resource/lists/{id}/items/",
    params(("id" = i64, Path, description = "List id")),
    request_body = ItemRequest,
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = Item),
        (status = 400, description = "Malformed body or empty title"),
        (status = 404, description = "No such list for this user")
    )
)]
pub async fn create_item(
    state: &AppState,
    principal: &Principal,
    list_id: i64,
    body: &[u8],
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let request = parse_request(body)?;
    let item = ItemRepository::new(&state.db)
        .create(
            list_id,
            principal,
            &request.title,
            &request.description,
            request.completed.unwrap_or(false),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/resource/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Item),
        (status = 404, description = "No such item for this user")
    )
)]
pub async fn get_item(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<Json<Item>, ApiError> {
    let item = ItemRepository::new(&state.db).get(id, principal).await?;
    Ok(Json(item))
}

/// Omitting `completed` keeps the current flag.
#[utoipa::path(
    put,
    path = "/resource/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    request_body = ItemRequest,
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Item),
        (status = 400, description = "Malformed body or empty title"),
        (status = 404, description = "No such item for this user")
    )
)]
pub async fn update_item(
    state: &AppState,
    principal: &Principal,
    id: i64,
    body: &[u8],
) -> Result<Json<Item>, ApiError> {
    let request = parse_request(body)?;
    let item = ItemRepository::new(&state.db)
        .update(
            id,
            principal,
            &request.title,
            &request.description,
            request.completed,
        )
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    patch,
    path = "/resource/items/{id}/toggle",
    params(("id" = i64, Path, description = "Item id")),
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Item),
        (status = 404, description = "No such item for this user")
    )
)]
pub async fn toggle_item(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<Json<Item>, ApiError> {
    let item = ItemRepository::new(&state.db).toggle(id, principal).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/resource/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    tag = "Items",
    security(("bearer_auth" = [])),
    responses(
        (status = 204),
        (status = 404, description = "No such item for this user")
    )
)]
pub async fn delete_item(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<StatusCode, ApiError> {
    ItemRepository::new(&state.db).delete(id, principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CredentialRepository, Database, ListRepository};

    async fn state_with_list() -> (AppState, Principal, i64) {
        let db = Database::in_memory().await.unwrap();
        CredentialRepository::new(&db)
            .create("alice", "digest")
            .await
            .unwrap();
        let alice = Principal::new("alice");
        let list = ListRepository::new(&db)
            .create(&alice, "groceries", "")
            .await
            .unwrap();
        let state = AppState::new(db, b"items-test-secret").unwrap();
        (state, alice, list.id)
    }

    #[tokio::test]
    async fn create_defaults_to_incomplete() {
        let (state, alice, list_id) = state_with_list().await;

        let (status, Json(item)) = create_item(&state, &alice, list_id, br#"{"title":"milk"}"#)
            .await
            .expect("item creation succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert!(!item.completed);
        assert_eq!(item.description, "");

        let Json(items) = list_items(&state, &alice, list_id).await.unwrap();
        assert_eq!(items, vec![item]);
    }

    #[tokio::test]
    async fn create_rejects_blank_title_and_missing_list() {
        let (state, alice, list_id) = state_with_list().await;

        let err = create_item(&state, &alice, list_id, br#"{"title":""}"#)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = create_item(&state, &alice, list_id + 1, br#"{"title":"milk"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn toggle_update_delete() {
        let (state, alice, list_id) = state_with_list().await;
        let (_, Json(item)) = create_item(&state, &alice, list_id, br#"{"title":"milk"}"#)
            .await
            .unwrap();

        let Json(toggled) = toggle_item(&state, &alice, item.id).await.unwrap();
        assert!(toggled.completed);

        let Json(updated) = update_item(&state, &alice, item.id, br#"{"title":"oat milk"}"#)
            .await
            .unwrap();
        assert_eq!(updated.title, "oat milk");
        assert!(updated.completed);

        assert_eq!(
            delete_item(&state, &alice, item.id).await.unwrap(),
            StatusCode::NO_CONTENT
        );
        let err = get_item(&state, &alice, item.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
