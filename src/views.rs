// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML rendering with templates compiled into the binary.

use axum::http::StatusCode;
use axum::response::Html;
use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::{AppError, Result};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("activities.html", include_str!("../templates/activities.html")),
    (
        "group_projects.html",
        include_str!("../templates/group_projects.html"),
    ),
    ("errors/400.html", include_str!("../templates/errors/400.html")),
    ("errors/401.html", include_str!("../templates/errors/401.html")),
    ("errors/403.html", include_str!("../templates/errors/403.html")),
    ("errors/404.html", include_str!("../templates/errors/404.html")),
    ("errors/500.html", include_str!("../templates/errors/500.html")),
    ("errors/error.html", include_str!("../templates/errors/error.html")),
];

/// Template environment shared by all handlers.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Load all templates. `base_url` is available to every template as the
    /// prefix for links.
    pub fn new(base_url: &str) -> std::result::Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        env.add_global("base_url", Value::from_safe_string(base_url));

        Ok(Self { env })
    }

    /// Render `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>> {
        self.try_render(name, ctx)
            .map(Html)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Template {} failed: {}", name, e)))
    }

    fn try_render<S: Serialize>(
        &self,
        name: &str,
        ctx: S,
    ) -> std::result::Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Render the page for an error response.
    ///
    /// 400/401/403/404 have their own pages. Anything else is the generic 500
    /// page in production, or the diagnostic page (with the original status)
    /// otherwise. Returns the status to send along with the body.
    pub fn render_error(
        &self,
        status: StatusCode,
        message: &str,
        production: bool,
    ) -> std::result::Result<(StatusCode, String), minijinja::Error> {
        let ctx = minijinja::context! {};
        match status.as_u16() {
            code @ (400 | 401 | 403 | 404) => {
                let body = self.try_render(&format!("errors/{}.html", code), ctx)?;
                Ok((status, body))
            }
            _ if production => {
                let body = self.try_render("errors/500.html", ctx)?;
                Ok((StatusCode::INTERNAL_SERVER_ERROR, body))
            }
            _ => {
                let body = self.try_render(
                    "errors/error.html",
                    minijinja::context! {
                        status => status.as_u16(),
                        reason => status.canonical_reason().unwrap_or("Error"),
                        message => message,
                    },
                )?;
                Ok((status, body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let views = Views::new("/").unwrap();
        for &(name, _) in TEMPLATES {
            assert!(views.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_home_login_link_carries_state() {
        let views = Views::new("/app").unwrap();
        let Html(body) = views
            .render("home.html", context! { state => "nonce123" })
            .unwrap();

        assert!(body.contains("/app/auth/initiateOAuth?state=nonce123"));
    }

    #[test]
    fn test_error_pages_by_status() {
        let views = Views::new("/").unwrap();

        let (status, body) = views
            .render_error(StatusCode::FORBIDDEN, "Not logged in", true)
            .unwrap();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("403 - Not logged in"));

        let (status, body) = views
            .render_error(StatusCode::BAD_GATEWAY, "secret detail", true)
            .unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret detail"));

        let (status, body) = views
            .render_error(StatusCode::BAD_GATEWAY, "upstream detail", false)
            .unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("upstream detail"));
    }
}
