// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Group / project / last-commit tree for the group overview page.

use serde::Serialize;

/// Groups the user belongs to, truncated to the first few.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsOverview {
    pub groups: Vec<GroupSummary>,
    /// More groups exist upstream
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub name: String,
    pub full_path: String,
    pub web_url: Option<String>,
    pub avatar_url: Option<String>,
    pub projects: Vec<ProjectSummary>,
    /// More projects exist in this group upstream
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub full_path: String,
    pub web_url: Option<String>,
    pub avatar_url: Option<String>,
    /// `None` for a project without commits
    pub last_commit: Option<CommitSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub id: String,
    /// Locale-formatted commit date
    pub committed_date: Option<String>,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAuthor {
    pub name: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}
