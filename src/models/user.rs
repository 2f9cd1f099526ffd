//! Profile page model.

use serde::Serialize;

use crate::session::UserProfile;
use crate::time_utils::format_locale;

/// Profile data as shown on the profile page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: u64,
    pub email: Option<String>,
    pub name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub last_activity_on: Option<String>,
}

impl From<&UserProfile> for ProfileView {
    fn from(user: &UserProfile) -> Self {
        ProfileView {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            last_activity_on: user.last_activity_on.as_deref().map(format_locale),
        }
    }
}
