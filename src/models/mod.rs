// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! View models handed to the templates.

pub mod activity;
pub mod group;
pub mod user;

pub use activity::ActivityEvent;
pub use group::{CommitAuthor, CommitSummary, GroupSummary, GroupsOverview, ProjectSummary};
pub use user::ProfileView;
