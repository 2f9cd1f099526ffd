// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recent-activity feed built from the GitLab events API.

use std::future::Future;

use crate::error::Result;
use crate::gitlab::{GitLabClient, GitLabEvent};
use crate::models::ActivityEvent;
use crate::session::AuthenticatedSession;

/// Maximum number of events shown.
pub const MAX_EVENTS: usize = 101;

/// Events requested per upstream page.
pub const PER_PAGE: u32 = 20;

/// Hard stop on the number of pages requested, whatever the upstream says.
pub const MAX_PAGES: u32 = (MAX_EVENTS as u32).div_ceil(PER_PAGE);

/// Fetch the user's most recent events, newest first.
///
/// Any failing page aborts the whole fetch; nothing partial is returned.
pub async fn fetch_recent_activities(
    client: &GitLabClient,
    auth: AuthenticatedSession<'_>,
) -> Result<Vec<ActivityEvent>> {
    let path = format!("users/{}/events", urlencoding::encode(&auth.user.username));
    let path = path.as_str();
    let creds = auth.creds;

    let events: Vec<GitLabEvent> =
        collect_pages(move |page| client.get_paged(path, creds, page, PER_PAGE)).await?;

    tracing::debug!(
        username = %auth.user.username,
        count = events.len(),
        "Fetched recent activities"
    );

    Ok(events.iter().map(ActivityEvent::from).collect())
}

/// Request pages starting at 1 until `MAX_EVENTS` records are collected, a
/// short page signals the end, or `MAX_PAGES` pages have been requested.
async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(page).await?;
        let full_page = batch.len() == PER_PAGE as usize;
        records.extend(batch);
        page += 1;

        if records.len() >= MAX_EVENTS || !full_page || page > MAX_PAGES {
            break;
        }
    }

    records.truncate(MAX_EVENTS);
    Ok(records)
}
