// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification.
//!
//! Digests are Argon2id in PHC string format with a random per-password
//! salt and the crate's default cost (19 MiB, 2 passes). Hashing is CPU
//! heavy, so async callers go through the `*_blocking` wrappers which run on
//! tokio's blocking pool.
//!
//! Lookups for a user that does not exist still pay for one verification
//! against a fixed digest, so response time does not reveal which usernames
//! are registered.

use std::sync::LazyLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashFailed(String),

    #[error("password task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Digest checked when there is no stored one.
static ABSENT_USER_DIGEST: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("absent-user").ok());

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashFailed(e.to_string()))
}

/// Check a password against a stored digest.
///
/// An unparseable digest counts as a mismatch.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// [`verify_password`] on the blocking pool, against `digest` when present
/// and a fixed digest otherwise.
///
/// `None` always yields `false`, after the same Argon2 work as a real check.
pub async fn verify_password_blocking(
    password: String,
    digest: Option<String>,
) -> Result<bool, PasswordError> {
    Ok(tokio::task::spawn_blocking(move || match digest {
        Some(digest) => verify_password(&password, &digest),
        None => {
            if let Some(absent) = ABSENT_USER_DIGEST.as_deref() {
                verify_password(&password, absent);
            }
            false
        }
    })
    .await?)
}
