// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity feed entries.

use serde::Serialize;

use crate::gitlab::GitLabEvent;
use crate::time_utils::format_locale;

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// e.g. "pushed to", "opened", "commented on"
    pub action_name: String,
    /// Locale-formatted creation time
    pub created_at: String,
    pub target_title: Option<String>,
    pub target_type: Option<String>,
}

impl From<&GitLabEvent> for ActivityEvent {
    fn from(event: &GitLabEvent) -> Self {
        let push = event.push_data.as_ref();

        ActivityEvent {
            action_name: event.action_name.clone(),
            created_at: format_locale(&event.created_at),
            target_title: non_empty(event.target_title.as_deref())
                .or_else(|| non_empty(push.and_then(|p| p.commit_title.as_deref()))),
            target_type: non_empty(event.target_type.as_deref())
                .or_else(|| non_empty(push.and_then(|p| p.ref_type.as_deref()))),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
