// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{TokenError, TokenService};
use crate::storage::Database;

/// Shared request state: the store handle and the read-only token service.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: Database, jwt_secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            db: Arc::new(db),
            tokens: Arc::new(TokenService::new(jwt_secret)?),
        })
    }
}
