// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Two independent guards resolve a request to a [`Principal`]:
//!
//! - [`Auth`]: `Authorization: Bearer <token>` for the resource API. Tokens
//!   are HS256 JWTs issued by [`TokenService`] at signup/login.
//! - [`AdminAuth`]: HTTP Basic credentials for the admin surface, checked
//!   against the stored Argon2 digest on every request.
//!
//! ## Security
//!
//! - Login and both guards answer a uniform 401; an unknown username is
//!   indistinguishable from a wrong password
//! - Admin failures are logged with the caller's network origin
//! - Passwords and digests are never logged

pub mod basic;
pub mod bearer;
pub mod error;
pub mod password;
pub mod principal;
pub mod token;

pub use basic::AdminAuth;
pub use bearer::Auth;
pub use error::AuthError;
pub use principal::Principal;
pub use token::{TokenError, TokenService};
