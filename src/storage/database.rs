// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded SQLite database (ACID) shared by all repositories.
//!
//! ## Table Layout
//!
//! - `credentials`: username (primary key) → password hash, created_at
//! - `lists`: id → owner, title, description, timestamps
//! - `items`: id → list_id, owner (copy of the list owner), title,
//!   description, completed, timestamps
//!
//! Foreign keys are enforced. There is no `ON DELETE CASCADE`: removing a
//! list or a credential deletes the dependent rows explicitly inside one
//! transaction.
//!
//! Timestamps are stored as RFC 3339 text with fixed nanosecond precision so
//! that lexical order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use tokio_rusqlite::Connection;

/// Schema applied on every open. Idempotent.
const CREATE_SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS credentials (
    username      TEXT PRIMARY KEY NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lists (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    owner       TEXT NOT NULL REFERENCES credentials(username),
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_lists_owner ON lists(owner, created_at);

CREATE TABLE IF NOT EXISTS items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id     INTEGER NOT NULL REFERENCES lists(id),
    owner       TEXT NOT NULL REFERENCES credentials(username),
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_items_list ON items(list_id, created_at);
CREATE INDEX IF NOT EXISTS idx_items_owner ON items(owner);
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection error: {0}")]
    Connection(#[from] tokio_rusqlite::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the SQLite database.
///
/// Statements run on the connection's dedicated thread; concurrent callers
/// queue there, and multi-statement operations use SQLite transactions.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path and apply the schema.
    ///
    /// `:memory:` opens a private in-memory database.
    pub async fn open(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path).await?;
        conn.call(|conn| {
            conn.execute_batch(CREATE_SCHEMA)?;
            Ok(())
        })
        .await?;

        tracing::debug!(path = %path, "database opened");
        Ok(Self { conn })
    }

    /// Open a fresh in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::open(":memory:").await
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Round-trip a trivial query; used by the readiness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        self.conn
            .call(|conn| {
                conn.query_row("SELECT 1", [], |_| Ok(()))?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn execute_batch(&self, sql: &'static str) -> StoreResult<()> {
        self.conn
            .call(move |conn| {
                conn.execute_batch(sql)?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

/// Encode a timestamp for storage.
pub(crate) fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Decode a stored timestamp.
pub(crate) fn decode_ts(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

/// Read a timestamp column, surfacing bad text as a conversion failure.
pub(crate) fn ts_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode_ts(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn open_in_memory_applies_schema() {
        let db = Database::in_memory().await.unwrap();
        db.ping().await.unwrap();

        let tables: Vec<String> = db
            .conn()
            .call(|conn| {
                let mut stmt = conn
                    .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap();

        for table in ["credentials", "items", "lists"] {
            assert!(tables.iter().any(|t| t == table), "missing {table}");
        }
    }

    #[tokio::test]
    async fn open_on_disk_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("checklist.db");
        let path = path.to_str().unwrap();

        Database::open(path).await.unwrap();
        let reopened = Database::open(path).await.unwrap();
        reopened.ping().await.unwrap();
    }

    #[test]
    fn timestamps_sort_lexically() {
        let earlier = Utc::now();
        let later = earlier + Duration::nanoseconds(1);
        assert!(encode_ts(earlier) < encode_ts(later));
        assert_eq!(decode_ts(&encode_ts(earlier)).unwrap(), earlier);
    }
}
