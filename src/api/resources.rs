// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catch-all handlers for the per-id resource paths.
//!
//! The bearer guard runs first, so an unauthenticated request is 401 no
//! matter how malformed its path is. The path is then resolved by
//! [`crate::dispatch`] and the selected operation runs with the principal.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use super::{items, lists};
use crate::{
    auth::{Auth, Principal},
    dispatch::{dispatch_item, dispatch_list, Operation},
    error::ApiError,
    state::AppState,
};

/// Everything under `/resource/lists/`.
pub async fn lists_resource(
    State(state): State<AppState>,
    Auth(principal): Auth,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let operation = dispatch_list(&method, uri.path())?;
    perform(&state, &principal, operation, &body).await
}

/// Everything under `/resource/items/`.
pub async fn items_resource(
    State(state): State<AppState>,
    Auth(principal): Auth,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let operation = dispatch_item(&method, uri.path())?;
    perform(&state, &principal, operation, &body).await
}

async fn perform(
    state: &AppState,
    principal: &Principal,
    operation: Operation,
    body: &[u8],
) -> Result<Response, ApiError> {
    tracing::debug!(?operation, principal = %principal, "dispatching resource operation");

    let response = match operation {
        Operation::GetList(id) => lists::get_list(state, principal, id).await?.into_response(),
        Operation::UpdateList(id) => lists::update_list(state, principal, id, body)
            .await?
            .into_response(),
        Operation::DeleteList(id) => lists::delete_list(state, principal, id)
            .await?
            .into_response(),
        Operation::ListItems(id) => items::list_items(state, principal, id)
            .await?
            .into_response(),
        Operation::CreateItem(id) => items::create_item(state, principal, id, body)
            .await?
            .into_response(),
        Operation::GetItem(id) => items::get_item(state, principal, id).await?.into_response(),
        Operation::UpdateItem(id) => items::update_item(state, principal, id, body)
            .await?
            .into_response(),
        Operation::DeleteItem(id) => items::delete_item(state, principal, id)
            .await?
            .into_response(),
        Operation::ToggleItem(id) => items::toggle_item(state, principal, id)
            .await?
            .into_response(),
    };
    Ok(response)
}
