// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod groups;
pub mod oauth;

pub use activity::fetch_recent_activities;
pub use groups::fetch_groups_with_projects;
pub use oauth::{check_authentication, AuthStage, ProfileLoaded, TokenObtained};
