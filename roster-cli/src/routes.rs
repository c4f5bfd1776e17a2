//! Dashboard routes and the authentication guard.

use std::fmt;

use crate::auth::SessionContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    List,
    Details(String),
    PhotoResult,
    Chart,
    Map,
}

impl Route {
    /// Resolve a path. `/` goes to the login gate, anything unknown to the list.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["login"] => Route::Login,
            ["list"] => Route::List,
            ["details", id] => Route::Details(id.to_string()),
            ["photo-result"] => Route::PhotoResult,
            ["chart"] => Route::Chart,
            ["map"] => Route::Map,
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::List => "/list".to_string(),
            Route::Details(id) => format!("/details/{}", id),
            Route::PhotoResult => "/photo-result".to_string(),
            Route::Chart => "/chart".to_string(),
            Route::Map => "/map".to_string(),
        }
    }

    /// Everything except the login gate needs an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Route actually shown for `route` under `ctx`.
pub fn guard(route: Route, ctx: &SessionContext) -> Route {
    if route.is_protected() && !ctx.is_authenticated() {
        Route::Login
    } else {
        route
    }
}
