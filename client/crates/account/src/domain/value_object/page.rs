//! Page Value Object
//!
//! The recognized page identifiers of the portal. Anything else renders the
//! not-found view without an auth check.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Profile,
    Login,
    Register,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Profile, Page::Login, Page::Register];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Profile => "profile",
            Page::Login => "login",
            Page::Register => "register",
        }
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        match self {
            Page::Home => "/home",
            Page::Profile => "/profile",
            Page::Login => "/login",
            Page::Register => "/register",
        }
    }

    /// Pages that need a session; login and register stay reachable without one
    #[inline]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Page::Home | Page::Profile)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.code() == code)
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::from_code(s).ok_or_else(|| format!("unknown page: {s}"))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Page::from_code("profile"), Some(Page::Profile));
        assert_eq!(Page::from_code("Profile"), None);
        assert_eq!(Page::from_code("settings"), None);
    }

    #[test]
    fn test_requires_auth() {
        assert!(Page::Home.requires_auth());
        assert!(Page::Profile.requires_auth());
        assert!(!Page::Login.requires_auth());
        assert!(!Page::Register.requires_auth());
    }
}
