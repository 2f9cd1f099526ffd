// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, security, error pages).

pub mod auth;
pub mod error_pages;
pub mod security;

pub use auth::{require_auth, AuthContext};
pub use error_pages::render_error_pages;
