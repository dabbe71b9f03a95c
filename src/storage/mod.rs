// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage on an embedded SQLite database.
//!
//! ## Layout
//!
//! ```text
//! credentials(username PK, password_hash, created_at)
//! lists(id PK, owner → credentials, title, description, created_at, updated_at)
//! items(id PK, list_id → lists, owner → credentials, title, description,
//!       completed, created_at, updated_at)
//! ```
//!
//! ## Access Rules
//!
//! - Every list and item statement carries the principal in its predicate
//! - Item statements additionally re-check the parent list's owner
//! - A row owned by someone else is reported exactly like a missing row
//! - Multi-row deletes run in a single transaction

pub mod database;
pub mod ownership;
pub mod repository;

pub use database::{Database, StoreError, StoreResult};
pub use ownership::{OwnedResource, OwnershipCheck};
pub use repository::{CredentialRepository, ItemRepository, ListRepository};
