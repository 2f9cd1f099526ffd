// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab upstream: HTTP client and wire types.

pub mod client;
pub mod types;

pub use client::GitLabClient;
pub use types::{GitLabEvent, GitLabUser};
