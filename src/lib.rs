// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Checklist Server - owner-scoped lists and items over HTTP
//!
//! Users sign up with a username and password and receive a 24 hour bearer
//! token. Every list and item belongs to exactly one user and is invisible
//! to everyone else. A separate admin surface, guarded by HTTP Basic
//! credentials, manages the credentials themselves.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer and Basic guards, token service, password hashing
//! - `dispatch` - Manual path dispatch for per-id resource paths
//! - `storage` - SQLite database and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
