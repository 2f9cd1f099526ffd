// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group / project overview built from a single GraphQL query.

use crate::error::{AppError, Result};
use crate::gitlab::types::{GqlCommit, GqlGroup, GqlProject, GroupsQueryData};
use crate::gitlab::GitLabClient;
use crate::models::{CommitAuthor, CommitSummary, GroupSummary, GroupsOverview, ProjectSummary};
use crate::session::Credentials;
use crate::time_utils::format_locale;

/// Groups shown on the overview.
pub const MAX_GROUPS: usize = 3;

/// Projects shown per group.
pub const MAX_PROJECTS: usize = 5;

/// GraphQL query for the first groups of the current user, their first
/// projects (subgroups included) and each project's last commit.
pub fn groups_query() -> String {
    format!(
        r#"query {{
  currentUser {{
    groups(first: {MAX_GROUPS}) {{
      pageInfo {{ hasNextPage }}
      nodes {{
        id
        name
        fullPath
        webUrl
        avatarUrl
        projects(first: {MAX_PROJECTS}, includeSubgroups: true) {{
          pageInfo {{ hasNextPage }}
          nodes {{
            id
            name
            fullPath
            webUrl
            avatarUrl
            repository {{
              tree {{
                lastCommit {{
                  id
                  committedDate
                  authorName
                  author {{ name username avatarUrl }}
                }}
              }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

/// Fetch the user's groups with their projects in one round trip.
pub async fn fetch_groups_with_projects(
    client: &GitLabClient,
    creds: &Credentials,
) -> Result<GroupsOverview> {
    let data: GroupsQueryData = client.post_graphql(&groups_query(), creds).await?;
    let overview = reshape(data)?;

    tracing::debug!(
        groups = overview.groups.len(),
        has_next_page = overview.has_next_page,
        "Fetched group overview"
    );
    Ok(overview)
}

/// Flatten the GraphQL result into the view model.
///
/// Groups and projects are cut to `MAX_GROUPS` / `MAX_PROJECTS` even though
/// the query already asks for no more.
pub fn reshape(data: GroupsQueryData) -> Result<GroupsOverview> {
    let user = data
        .current_user
        .ok_or_else(|| AppError::upstream(None, "GraphQL currentUser is null"))?;

    Ok(GroupsOverview {
        has_next_page: user.groups.page_info.has_next_page,
        groups: user
            .groups
            .nodes
            .into_iter()
            .take(MAX_GROUPS)
            .map(group_summary)
            .collect(),
    })
}

fn group_summary(group: GqlGroup) -> GroupSummary {
    GroupSummary {
        name: group.name,
        full_path: group.full_path,
        web_url: group.web_url,
        avatar_url: group.avatar_url,
        has_next_page: group.projects.page_info.has_next_page,
        projects: group
            .projects
            .nodes
            .into_iter()
            .take(MAX_PROJECTS)
            .map(project_summary)
            .collect(),
    }
}

fn project_summary(project: GqlProject) -> ProjectSummary {
    let last_commit = project
        .repository
        .and_then(|repo| repo.tree)
        .and_then(|tree| tree.last_commit)
        .map(commit_summary);

    ProjectSummary {
        name: project.name,
        full_path: project.full_path,
        web_url: project.web_url,
        avatar_url: project.avatar_url,
        last_commit,
    }
}

fn commit_summary(commit: GqlCommit) -> CommitSummary {
    // Commits by addresses with no GitLab account have no `author`.
    let author = match commit.author {
        Some(author) => CommitAuthor {
            name: author.name,
            username: Some(author.username),
            avatar_url: author.avatar_url,
        },
        None => CommitAuthor {
            name: commit.author_name.unwrap_or_else(|| "Unknown".to_string()),
            username: None,
            avatar_url: None,
        },
    };

    CommitSummary {
        id: commit.id,
        committed_date: commit.committed_date.as_deref().map(format_locale),
        author,
    }
}
