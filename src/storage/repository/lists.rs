// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! List repository.
//!
//! Every statement filters by `owner`, so a list that belongs to another
//! principal behaves exactly like one that does not exist.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::super::database::{encode_ts, ts_column};
use super::super::{Database, OwnershipCheck, StoreError, StoreResult};
use super::is_constraint_violation;
use crate::auth::Principal;
use crate::models::TodoList;

const SELECT_LIST: &str =
    "SELECT id, owner, title, description, created_at, updated_at FROM lists";

/// Repository for list operations.
pub struct ListRepository<'a> {
    db: &'a Database,
}

impl<'a> ListRepository<'a> {
    /// Create a new ListRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a list owned by `owner`.
    ///
    /// `title` is expected to be validated already.
    pub async fn create(
        &self,
        owner: &Principal,
        title: &str,
        description: &str,
    ) -> StoreResult<TodoList> {
        let now = Utc::now();
        let (owner_name, title_owned, description_owned, ts) = (
            owner.username.clone(),
            title.to_string(),
            description.to_string(),
            encode_ts(now),
        );

        let id = self
            .db
            .conn()
            .call(move |conn| {
                match conn.execute(
                    "INSERT INTO lists (owner, title, description, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)",
                    params![owner_name, title_owned, description_owned, ts],
                ) {
                    Ok(_) => Ok(Some(conn.last_insert_rowid())),
                    // The owner's credential no longer exists.
                    Err(e) if is_constraint_violation(&e) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))?;

        tracing::debug!(list_id = id, owner = %owner, "list created");
        Ok(TodoList {
            id,
            owner: owner.username.clone(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a list by id, scoped to `owner`.
    pub async fn get(&self, id: i64, owner: &Principal) -> StoreResult<TodoList> {
        let owner_name = owner.username.clone();
        self.db
            .conn()
            .call(move |conn| {
                Ok(conn
                    .query_row(
                        &format!("{SELECT_LIST} WHERE id = ?1 AND owner = ?2"),
                        params![id, owner_name],
                        list_from_row,
                    )
                    .optional()?)
            })
            .await?
            .verify_owner(owner, "List")
    }

    /// All lists owned by `owner`, newest first.
    pub async fn list_by_owner(&self, owner: &Principal) -> StoreResult<Vec<TodoList>> {
        let owner_name = owner.username.clone();
        let lists = self
            .db
            .conn()
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_LIST} WHERE owner = ?1 ORDER BY created_at DESC, id DESC"
                ))?;
                let lists = stmt
                    .query_map(params![owner_name], list_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(lists)
            })
            .await?;
        Ok(lists)
    }

    /// Replace a list's title and description and refresh `updated_at`.
    pub async fn update(
        &self,
        id: i64,
        owner: &Principal,
        title: &str,
        description: &str,
    ) -> StoreResult<TodoList> {
        let (owner_name, title_owned, description_owned, ts) = (
            owner.username.clone(),
            title.to_string(),
            description.to_string(),
            encode_ts(Utc::now()),
        );

        self.db
            .conn()
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE lists SET title = ?3, description = ?4, updated_at = ?5
                     WHERE id = ?1 AND owner = ?2",
                    params![id, owner_name, title_owned, description_owned, ts],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                Ok(Some(conn.query_row(
                    &format!("{SELECT_LIST} WHERE id = ?1"),
                    params![id],
                    list_from_row,
                )?))
            })
            .await?
            .verify_owner(owner, "List")
    }

    /// Delete a list and all of its items in one transaction.
    ///
    /// Any failure rolls back both deletes.
    pub async fn delete_cascade(&self, id: i64, owner: &Principal) -> StoreResult<()> {
        let owner_name = owner.username.clone();
        let deleted = self
            .db
            .conn()
            .call(move |conn| {
                let tx = conn.transaction()?;

                let owned: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1 AND owner = ?2)",
                    params![id, owner_name],
                    |row| row.get(0),
                )?;
                if !owned {
                    return Ok(false);
                }

                let items = tx.execute("DELETE FROM items WHERE list_id = ?1", params![id])?;
                tx.execute(
                    "DELETE FROM lists WHERE id = ?1 AND owner = ?2",
                    params![id, owner_name],
                )?;
                tx.commit()?;

                tracing::debug!(list_id = id, items, "list deleted with its items");
                Ok(true)
            })
            .await?;

        if !deleted {
            return Err(StoreError::NotFound("List".to_string()));
        }
        Ok(())
    }
}

pub(super) fn list_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: ts_column(row, 4)?,
        updated_at: ts_column(row, 5)?,
    })
}
