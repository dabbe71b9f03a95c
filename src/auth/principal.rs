// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authenticated identity handed to every resource operation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authenticated principal.
///
/// The username is the only identity unit; there is no numeric user id.
/// Handlers receive it from a guard and pass it explicitly to storage calls,
/// which use it as an ownership filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}
