// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize` and/or `Deserialize` plus
//! `ToSchema` for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Accounts**: signup/login payloads and the public view of a credential
//! - **Lists**: owner-scoped lists
//! - **Items**: entries inside a list, carrying a completion flag
//!
//! Owner fields are always filled in by the server from the authenticated
//! principal; request types have no owner field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Account Models
// =============================================================================

/// The distinguished administrator principal. It cannot be deleted.
pub const ADMIN_USERNAME: &str = "admin";

/// Public view of a stored credential. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Login, signup and admin-create payload.
#[derive(Clone, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returned by login and signup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token, valid for 24 hours.
    pub token: String,
    pub user: User,
}

// =============================================================================
// List Models
// =============================================================================

/// A list owned by a single principal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TodoList {
    pub id: i64,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create or replace a list's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Item Models
// =============================================================================

/// An entry in a list.
///
/// `owner` is copied from the parent list at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub list_id: i64,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create or replace an item's editable fields.
///
/// On create a missing `completed` means `false`; on update it keeps the
/// current value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Require a non-blank title.
pub fn validate_title(title: &str) -> Result<&str, &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err("Title is required")
    } else {
        Ok(trimmed)
    }
}
