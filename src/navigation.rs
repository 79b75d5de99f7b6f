//! Route table and the authenticated-route guard.

use std::fmt;

pub const SIGN_IN_REQUIRED: &str = "Necesitas iniciar sesión para acceder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CookiesPolicy,
    PrivacyPolicy,
    WhatIsThis,
    Profile,
    UserDetail(String),
    ProjectNew,
    ProjectDetail(String),
    ProjectEdit(String),
    ProjectForum(String),
    ForumGeneral,
}

impl Route {
    /// Resolve a path. `/projects` redirects to [`Route::Home`]; unknown
    /// paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["cookies-policy"] => Route::CookiesPolicy,
            ["privacy-policy"] => Route::PrivacyPolicy,
            ["what-is"] => Route::WhatIsThis,
            ["profile"] => Route::Profile,
            ["users", id] => Route::UserDetail(decode(id)),
            ["projects"] => Route::Home,
            ["projects", "new"] => Route::ProjectNew,
            ["projects", id] => Route::ProjectDetail(decode(id)),
            ["projects", id, "edit"] => Route::ProjectEdit(decode(id)),
            ["projects", id, "forum"] => Route::ProjectForum(decode(id)),
            ["forum"] => Route::ForumGeneral,
            _ => return None,
        };
        Some(route)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::CookiesPolicy => "cookies-policy",
            Route::PrivacyPolicy => "privacy-policy",
            Route::WhatIsThis => "what-is-this",
            Route::Profile => "profile",
            Route::UserDetail(_) => "user-detail",
            Route::ProjectNew => "project-new",
            Route::ProjectDetail(_) => "project-detail",
            Route::ProjectEdit(_) => "project-edit",
            Route::ProjectForum(_) => "project-forum",
            Route::ForumGeneral => "forum-general",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Profile | Route::UserDetail(_) | Route::ProjectNew | Route::ProjectEdit(_)
        )
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::CookiesPolicy => write!(f, "/cookies-policy"),
            Route::PrivacyPolicy => write!(f, "/privacy-policy"),
            Route::WhatIsThis => write!(f, "/what-is"),
            Route::Profile => write!(f, "/profile"),
            Route::UserDetail(id) => write!(f, "/users/{}", urlencoding::encode(id)),
            Route::ProjectNew => write!(f, "/projects/new"),
            Route::ProjectDetail(id) => write!(f, "/projects/{}", urlencoding::encode(id)),
            Route::ProjectEdit(id) => write!(f, "/projects/{}/edit", urlencoding::encode(id)),
            Route::ProjectForum(id) => write!(f, "/projects/{}/forum", urlencoding::encode(id)),
            Route::ForumGeneral => write!(f, "/forum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Blocked {
        redirect: Route,
        notice: &'static str,
    },
}

pub fn guard(route: Route, signed_in: bool) -> Navigation {
    if route.requires_auth() && !signed_in {
        tracing::debug!(route = route.name(), "Navigation blocked: sign-in required");
        return Navigation::Blocked {
            redirect: Route::Home,
            notice: SIGN_IN_REQUIRED,
        };
    }
    Navigation::Proceed(route)
}
