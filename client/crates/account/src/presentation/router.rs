//! Route Surface
//!
//! `/login`, `/register`, `/:page` and a catch-all not-found.

use std::fmt;

use crate::domain::value_object::page::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(Page),
    /// `/:page` with an unrecognized identifier
    UnknownPage(String),
    NotFound,
}

impl Route {
    /// Query string and fragment are ignored; one trailing slash is allowed
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let Some(rest) = path.strip_prefix('/') else {
            return Route::NotFound;
        };
        let segment = rest.strip_suffix('/').unwrap_or(rest);

        if segment.is_empty() || segment.contains('/') {
            return Route::NotFound;
        }
        match Page::from_code(segment) {
            Some(page) => Route::Page(page),
            None => Route::UnknownPage(segment.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Page(page) => page.path().to_string(),
            Route::UnknownPage(code) => format!("/{code}"),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
