// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential repository.
//!
//! A credential is a username plus its Argon2 digest. Usernames are unique
//! and never renamed. The digest only leaves this module through
//! [`CredentialRepository::password_hash`], which the password check uses.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::super::database::{encode_ts, ts_column};
use super::super::{Database, StoreError, StoreResult};
use super::is_constraint_violation;
use crate::models::User;

/// Repository for credential operations.
pub struct CredentialRepository<'a> {
    db: &'a Database,
}

impl<'a> CredentialRepository<'a> {
    /// Create a new CredentialRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a new credential.
    ///
    /// # Errors
    /// `AlreadyExists` if the username is taken.
    pub async fn create(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let created_at = Utc::now();
        let (name, hash, ts) = (
            username.to_string(),
            password_hash.to_string(),
            encode_ts(created_at),
        );

        let inserted = self
            .db
            .conn()
            .call(move |conn| {
                match conn.execute(
                    "INSERT INTO credentials (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                    params![name, hash, ts],
                ) {
                    Ok(_) => Ok(true),
                    Err(e) if is_constraint_violation(&e) => Ok(false),
                    Err(e) => Err(e.into()),
                }
            })
            .await?;

        if !inserted {
            return Err(StoreError::AlreadyExists("User".to_string()));
        }

        tracing::info!(username = %username, "credential created");
        Ok(User {
            username: username.to_string(),
            created_at,
        })
    }

    /// Store a credential unless the username is already taken.
    ///
    /// Returns whether a row was inserted; an existing digest is left as is.
    pub async fn ensure(&self, username: &str, password_hash: &str) -> StoreResult<bool> {
        let (name, hash, ts) = (
            username.to_string(),
            password_hash.to_string(),
            encode_ts(Utc::now()),
        );

        let inserted = self
            .db
            .conn()
            .call(move |conn| {
                Ok(conn.execute(
                    "INSERT OR IGNORE INTO credentials (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                    params![name, hash, ts],
                )?)
            })
            .await?;
        Ok(inserted > 0)
    }

    /// Stored digest for `username`, if the user exists.
    pub async fn password_hash(&self, username: &str) -> StoreResult<Option<String>> {
        let name = username.to_string();
        let hash = self
            .db
            .conn()
            .call(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT password_hash FROM credentials WHERE username = ?1",
                        params![name],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?)
            })
            .await?;
        Ok(hash)
    }

    /// Get the public view of a credential.
    pub async fn get(&self, username: &str) -> StoreResult<User> {
        let name = username.to_string();
        self.db
            .conn()
            .call(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT username, created_at FROM credentials WHERE username = ?1",
                        params![name],
                        user_from_row,
                    )
                    .optional()?)
            })
            .await?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }

    /// List all credentials (admin view), oldest first.
    pub async fn list_all(&self) -> StoreResult<Vec<User>> {
        let users = self
            .db
            .conn()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT username, created_at FROM credentials ORDER BY created_at ASC, username ASC",
                )?;
                let users = stmt
                    .query_map([], user_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(users)
            })
            .await?;
        Ok(users)
    }

    /// Delete a credential together with every list and item it owns.
    ///
    /// All three deletes run in one transaction.
    pub async fn delete_cascade(&self, username: &str) -> StoreResult<()> {
        let name = username.to_string();
        let deleted = self
            .db
            .conn()
            .call(move |conn| {
                let tx = conn.transaction()?;

                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM credentials WHERE username = ?1)",
                    params![name],
                    |row| row.get(0),
                )?;
                if !exists {
                    return Ok(false);
                }

                tx.execute(
                    "DELETE FROM items WHERE owner = ?1 OR list_id IN (SELECT id FROM lists WHERE owner = ?1)",
                    params![name],
                )?;
                tx.execute("DELETE FROM lists WHERE owner = ?1", params![name])?;
                tx.execute("DELETE FROM credentials WHERE username = ?1", params![name])?;
                tx.commit()?;
                Ok(true)
            })
            .await?;

        if !deleted {
            return Err(StoreError::NotFound("User".to_string()));
        }

        tracing::info!(username = %username, "credential deleted");
        Ok(())
    }
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        username: row.get(0)?,
        created_at: ts_column(row, 1)?,
    })
}
