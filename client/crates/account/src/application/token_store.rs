//! Token Store
//!
//! Typed access to the persisted session and remember-me keys. Every read
//! goes through the cookie jar, so expired entries are never returned.

use std::sync::Arc;
use std::time::Duration;

use platform::cookie::CookieJar;

use crate::application::config::AccountConfig;
use crate::domain::entity::token_set::{SessionCredentials, TokenSet};
use crate::error::AccountResult;

/// Value stored under the logged-in flag
const LOGGED_IN: &str = "true";

/// Encrypted remember-me entries as stored
#[derive(Clone, PartialEq, Eq)]
pub struct RememberedRecord {
    pub sealed_login: Option<String>,
    pub sealed_password: Option<String>,
    /// Raw expiry value (epoch milliseconds as text)
    pub expires: Option<String>,
}

impl RememberedRecord {
    pub fn is_empty(&self) -> bool {
        self.sealed_login.is_none() && self.sealed_password.is_none() && self.expires.is_none()
    }
}

#[derive(Clone)]
pub struct TokenStore {
    jar: Arc<dyn CookieJar>,
    config: Arc<AccountConfig>,
}

impl TokenStore {
    pub fn new(jar: Arc<dyn CookieJar>, config: Arc<AccountConfig>) -> Self {
        Self { jar, config }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key)
    }

    pub fn set(&self, key: &str, value: &str, ttl: Duration) -> AccountResult<()> {
        self.jar.set(key, value, ttl)?;
        Ok(())
    }

    /// Removing an absent key is a no-op
    pub fn remove(&self, key: &str) -> AccountResult<()> {
        self.jar.remove(key)?;
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(&self.config.cookies.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get(&self.config.cookies.refresh_token)
    }

    pub fn is_logged_in(&self) -> bool {
        self.get(&self.config.cookies.logged_in).as_deref() == Some(LOGGED_IN)
    }

    /// Snapshot of the auth headers for an explicit call
    pub fn credentials(&self) -> SessionCredentials {
        SessionCredentials::new(self.access_token(), self.refresh_token())
    }

    pub fn store_token_set(&self, tokens: &TokenSet) -> AccountResult<()> {
        let cookies = &self.config.cookies;
        self.set(
            &cookies.access_token,
            &tokens.access_token,
            self.config.access_token_ttl,
        )?;
        self.set(
            &cookies.refresh_token,
            &tokens.refresh_token,
            self.config.refresh_token_ttl,
        )?;
        if tokens.logged_in {
            self.set(&cookies.logged_in, LOGGED_IN, self.config.logged_in_ttl)?;
        }
        tracing::debug!("Session tokens stored");
        Ok(())
    }

    /// Refresh result: the refresh token and logged-in flag stay as they are
    pub fn replace_access_token(&self, access_token: &str) -> AccountResult<()> {
        self.set(
            &self.config.cookies.access_token,
            access_token,
            self.config.access_token_ttl,
        )
    }

    /// Remove all three session keys
    ///
    /// Every removal is attempted; the first failure is returned.
    pub fn clear_session(&self) -> AccountResult<()> {
        let cookies = &self.config.cookies;
        let results = [
            self.remove(&cookies.access_token),
            self.remove(&cookies.refresh_token),
            self.remove(&cookies.logged_in),
        ];
        tracing::debug!("Session tokens cleared");
        results.into_iter().collect()
    }

    pub fn remembered(&self) -> RememberedRecord {
        let cookies = &self.config.cookies;
        RememberedRecord {
            sealed_login: self.get(&cookies.remembered_login),
            sealed_password: self.get(&cookies.remembered_password),
            expires: self.get(&cookies.remembered_expires),
        }
    }

    pub fn store_remembered(
        &self,
        sealed_login: &str,
        sealed_password: &str,
        expires_at_ms: i64,
    ) -> AccountResult<()> {
        let cookies = &self.config.cookies;
        let ttl = self.config.remember_me_ttl;
        self.set(&cookies.remembered_login, sealed_login, ttl)?;
        self.set(&cookies.remembered_password, sealed_password, ttl)?;
        self.set(&cookies.remembered_expires, &expires_at_ms.to_string(), ttl)
    }

    pub fn clear_remembered(&self) -> AccountResult<()> {
        let cookies = &self.config.cookies;
        let results = [
            self.remove(&cookies.remembered_login),
            self.remove(&cookies.remembered_password),
            self.remove(&cookies.remembered_expires),
        ];
        results.into_iter().collect()
    }
}
