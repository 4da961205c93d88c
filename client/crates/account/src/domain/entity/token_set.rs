//! Token Set Entity
//!
//! Tokens issued on sign-in and the credentials read back from the cookie
//! jar when calling protected endpoints.

use std::fmt;

/// Tokens returned by the login, register and refresh endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    /// Stored alongside the tokens as the logged-in flag
    pub logged_in: bool,
}

impl TokenSet {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            logged_in: true,
        }
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("logged_in", &self.logged_in)
            .finish()
    }
}

/// Auth headers for a protected call
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionCredentials {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }

    /// Access token usable as a bearer value
    ///
    /// Values a browser would have stringified from a missing token
    /// (`"null"`, `"undefined"`) count as absent.
    pub fn bearer(&self) -> Option<&str> {
        usable(self.access_token.as_deref())
    }

    pub fn refresh(&self) -> Option<&str> {
        usable(self.refresh_token.as_deref())
    }

    /// True when both headers can be sent
    pub fn is_usable(&self) -> bool {
        self.bearer().is_some() && self.refresh().is_some()
    }
}

fn usable(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() || value == "null" || value == "undefined" {
        return None;
    }
    if value.chars().any(char::is_whitespace) {
        return None;
    }
    Some(value)
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
