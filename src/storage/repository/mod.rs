// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the database.
//!
//! Each repository borrows the shared [`Database`](super::Database) and
//! provides the operations for one table. List and item operations take the
//! authenticated [`Principal`](crate::auth::Principal) explicitly.

pub mod credentials;
pub mod items;
pub mod lists;

pub use credentials::CredentialRepository;
pub use items::ItemRepository;
pub use lists::ListRepository;

/// Whether a statement failed on a UNIQUE / PRIMARY KEY / FOREIGN KEY check.
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
