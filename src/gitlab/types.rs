// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab REST and GraphQL response types.

use serde::Deserialize;

use crate::session::UserProfile;

/// `GET /api/v4/user`
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabUser {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub last_activity_on: Option<String>,
}

impl From<GitLabUser> for UserProfile {
    fn from(user: GitLabUser) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            name: user.name,
            username: user.username,
            avatar: user.avatar_url,
            last_activity_on: user.last_activity_on,
        }
    }
}

/// One record of `GET /api/v4/users/:username/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabEvent {
    pub action_name: String,
    pub created_at: String,
    #[serde(default)]
    pub target_title: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub push_data: Option<PushData>,
}

/// Push details, present on `pushed to` / `pushed new` events.
#[derive(Debug, Clone, Deserialize)]
pub struct PushData {
    #[serde(default)]
    pub commit_title: Option<String>,
    #[serde(default)]
    pub ref_type: Option<String>,
}

// ─── GraphQL ─────────────────────────────────────────────────

/// Standard GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

/// Generic GraphQL connection (`pageInfo` + `nodes`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsQueryData {
    pub current_user: Option<GqlUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlUser {
    pub groups: Connection<GqlGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlGroup {
    pub id: String,
    pub name: String,
    pub full_path: String,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub projects: Connection<GqlProject>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlProject {
    pub id: String,
    pub name: String,
    pub full_path: String,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub repository: Option<GqlRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GqlRepository {
    #[serde(default)]
    pub tree: Option<GqlTree>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlTree {
    #[serde(default)]
    pub last_commit: Option<GqlCommit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlCommit {
    pub id: String,
    #[serde(default)]
    pub committed_date: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author: Option<GqlAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlAuthor {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
