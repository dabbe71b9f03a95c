// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Item repository.
//!
//! Items carry a copy of their list's owner. That copy is never trusted on
//! its own: every statement also requires the parent list to be owned by
//! the same principal.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::super::database::{encode_ts, ts_column};
use super::super::{Database, OwnershipCheck, StoreError, StoreResult};
use crate::auth::Principal;
use crate::models::Item;

const SELECT_ITEM: &str = "SELECT i.id, i.list_id, i.owner, i.title, i.description, i.completed, \
     i.created_at, i.updated_at FROM items i JOIN lists l ON l.id = i.list_id";

/// Predicate on the `items` table (unaliased) with `?1` = item id and
/// `?2` = owner.
const OWNED_ITEM: &str = "id = ?1 AND owner = ?2 \
     AND EXISTS (SELECT 1 FROM lists l WHERE l.id = items.list_id AND l.owner = ?2)";

/// Repository for item operations.
pub struct ItemRepository<'a> {
    db: &'a Database,
}

impl<'a> ItemRepository<'a> {
    /// Create a new ItemRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create an item under `list_id`.
    ///
    /// The owner is copied from the list in the same statement; if the list
    /// does not exist or is not owned by `owner` nothing is inserted.
    pub async fn create(
        &self,
        list_id: i64,
        owner: &Principal,
        title: &str,
        description: &str,
        completed: bool,
    ) -> StoreResult<Item> {
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
                let inserted = conn.execute(
                    "INSERT INTO items (list_id, owner, title, description, completed, created_at, updated_at)
                     SELECT id, owner, ?3, ?4, ?5, ?6, ?6 FROM lists WHERE id = ?1 AND owner = ?2",
                    params![list_id, owner_name, title_owned, description_owned, completed, ts],
                )?;
                Ok((inserted > 0).then(|| conn.last_insert_rowid()))
            })
            .await?
            .ok_or_else(|| StoreError::NotFound("List".to_string()))?;

        tracing::debug!(item_id = id, list_id, owner = %owner, "item created");
        Ok(Item {
            id,
            list_id,
            owner: owner.username.clone(),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get an item by id, scoped to `owner` and its list's owner.
    pub async fn get(&self, id: i64, owner: &Principal) -> StoreResult<Item> {
        let owner_name = owner.username.clone();
        self.db
            .conn()
            .call(move |conn| Ok(fetch_owned(conn, id, &owner_name)?))
            .await?
            .verify_owner(owner, "Item")
    }

    /// Items of a list, newest first.
    ///
    /// # Errors
    /// `NotFound` if the list does not exist or is not owned by `owner`.
    pub async fn list_by_list(&self, list_id: i64, owner: &Principal) -> StoreResult<Vec<Item>> {
        let owner_name = owner.username.clone();
        self.db
            .conn()
            .call(move |conn| {
                let owned: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1 AND owner = ?2)",
                    params![list_id, owner_name],
                    |row| row.get(0),
                )?;
                if !owned {
                    return Ok(None);
                }

                let mut stmt = conn.prepare(&format!(
                    "{SELECT_ITEM} WHERE i.list_id = ?1 AND i.owner = ?2 AND l.owner = ?2
                     ORDER BY i.created_at DESC, i.id DESC"
                ))?;
                let items = stmt
                    .query_map(params![list_id, owner_name], item_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(items))
            })
            .await?
            .ok_or_else(|| StoreError::NotFound("List".to_string()))
    }

    /// Replace an item's title and description and refresh `updated_at`.
    ///
    /// `completed: None` keeps the current flag.
    pub async fn update(
        &self,
        id: i64,
        owner: &Principal,
        title: &str,
        description: &str,
        completed: Option<bool>,
    ) -> StoreResult<Item> {
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
                    &format!(
                        "UPDATE items SET title = ?3, description = ?4,
                         completed = COALESCE(?5, completed), updated_at = ?6
                         WHERE {OWNED_ITEM}"
                    ),
                    params![id, owner_name, title_owned, description_owned, completed, ts],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                Ok(fetch_owned(conn, id, &owner_name)?)
            })
            .await?
            .verify_owner(owner, "Item")
    }

    /// Flip the completed flag and refresh `updated_at`.
    pub async fn toggle(&self, id: i64, owner: &Principal) -> StoreResult<Item> {
        let owner_name = owner.username.clone();
        let ts = encode_ts(Utc::now());

        self.db
            .conn()
            .call(move |conn| {
                let changed = conn.execute(
                    &format!(
                        "UPDATE items SET completed = NOT completed, updated_at = ?3
                         WHERE {OWNED_ITEM}"
                    ),
                    params![id, owner_name, ts],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                Ok(fetch_owned(conn, id, &owner_name)?)
            })
            .await?
            .verify_owner(owner, "Item")
    }

    /// Delete an item.
    pub async fn delete(&self, id: i64, owner: &Principal) -> StoreResult<()> {
        let owner_name = owner.username.clone();
        let deleted = self
            .db
            .conn()
            .call(move |conn| {
                Ok(conn.execute(
                    &format!("DELETE FROM items WHERE {OWNED_ITEM}"),
                    params![id, owner_name],
                )?)
            })
            .await?;

        if deleted == 0 {
            return Err(StoreError::NotFound("Item".to_string()));
        }
        Ok(())
    }
}

fn fetch_owned(conn: &rusqlite::Connection, id: i64, owner: &str) -> rusqlite::Result<Option<Item>> {
    conn.query_row(
        &format!("{SELECT_ITEM} WHERE i.id = ?1 AND i.owner = ?2 AND l.owner = ?2"),
        params![id, owner],
        item_from_row,
    )
    .optional()
}

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        list_id: row.get(1)?,
        owner: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        completed: row.get(5)?,
        created_at: ts_column(row, 6)?,
        updated_at: ts_column(row, 7)?,
    })
}
