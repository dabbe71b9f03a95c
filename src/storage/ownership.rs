// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for loaded rows.
//!
//! Queries already filter by owner; this is the second check applied to
//! whatever a query returned before it leaves the repository. A mismatch
//! is reported as not-found so callers cannot probe for other users' ids.

use crate::auth::Principal;
use crate::models::{Item, TodoList};

use super::{StoreError, StoreResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's username.
    fn owner(&self) -> &str;

    /// Whether `principal` owns this resource.
    fn is_owned_by(&self, principal: &Principal) -> bool {
        self.owner() == principal.as_str()
    }
}

impl OwnedResource for TodoList {
    fn owner(&self) -> &str {
        &self.owner
    }
}

impl OwnedResource for Item {
    fn owner(&self) -> &str {
        &self.owner
    }
}

/// Extension trait turning an optional row into an owned resource or a
/// `NotFound` error.
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the resource if authorized.
    ///
    /// `resource` names the kind of row in the error message.
    fn verify_owner(self, principal: &Principal, resource: &str) -> StoreResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn verify_owner(self, principal: &Principal, resource: &str) -> StoreResult<T> {
        match self {
            Some(row) if row.is_owned_by(principal) => Ok(row),
            _ => Err(StoreError::NotFound(resource.to_string())),
        }
    }
}

impl<T: OwnedResource> OwnershipCheck<T> for StoreResult<T> {
    fn verify_owner(self, principal: &Principal, resource: &str) -> StoreResult<T> {
        self.map(Some)?.verify_owner(principal, resource)
    }
}
