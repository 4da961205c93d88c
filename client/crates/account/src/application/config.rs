//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

use platform::crypto::SealingKey;

use crate::error::{AccountError, AccountResult};

/// Re-export cookie attributes from platform
pub use platform::cookie::{CookieAttributes, SameSite};

/// Remember-me secret baked in at build time
const BUILD_REMEMBER_SECRET: Option<&str> = option_env!("PORTAL_REMEMBER_SECRET");

/// Used by debug builds when no build-time secret was provided
const DEVELOPMENT_REMEMBER_SECRET: &str = "portal-development-remember-secret";

/// Persisted key names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieNames {
    pub access_token: String,
    pub refresh_token: String,
    pub logged_in: String,
    pub remembered_login: String,
    pub remembered_password: String,
    pub remembered_expires: String,
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            access_token: "APP-ACCESS-TOKEN".to_string(),
            refresh_token: "APP-REFRESH-TOKEN".to_string(),
            logged_in: "APP-IS-LOGGED-IN".to_string(),
            remembered_login: "REMEMBERED-LOGIN".to_string(),
            remembered_password: "REMEMBERED-PASSWORD".to_string(),
            remembered_expires: "REMEMBERED-EXPIRES".to_string(),
        }
    }
}

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    pub cookies: CookieNames,
    /// Access token TTL (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh token TTL (1 day)
    pub refresh_token_ttl: Duration,
    /// Logged-in flag TTL (1 hour)
    pub logged_in_ttl: Duration,
    /// Remembered credentials TTL (365 days)
    pub remember_me_ttl: Duration,
    /// Key material for the remembered credentials
    pub remember_secret: String,
    /// Tear down the session when the access token cannot be decoded
    pub redirect_on_malformed_token: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            cookies: CookieNames::default(),
            access_token_ttl: Duration::from_secs(3600), // 1 hour
            refresh_token_ttl: Duration::from_secs(24 * 3600), // 1 day
            logged_in_ttl: Duration::from_secs(3600),
            remember_me_ttl: Duration::from_secs(365 * 24 * 3600), // 365 days
            remember_secret: String::new(),
            redirect_on_malformed_token: false,
        }
    }
}

impl AccountConfig {
    /// Create config with the fixed development secret
    pub fn development() -> Self {
        Self {
            remember_secret: DEVELOPMENT_REMEMBER_SECRET.to_string(),
            ..Default::default()
        }
    }

    /// Create config from the build environment
    ///
    /// Release builds require `PORTAL_REMEMBER_SECRET` at compile time.
    pub fn from_build_env() -> AccountResult<Self> {
        match BUILD_REMEMBER_SECRET.filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Self::default().with_remember_secret(secret)),
            None if cfg!(debug_assertions) => {
                tracing::warn!("PORTAL_REMEMBER_SECRET not set at build time, using development secret");
                Ok(Self::development())
            }
            None => Err(AccountError::Config(
                "PORTAL_REMEMBER_SECRET must be set when building a release".to_string(),
            )),
        }
    }

    pub fn with_remember_secret(mut self, secret: impl Into<String>) -> Self {
        self.remember_secret = secret.into();
        self
    }

    pub fn with_redirect_on_malformed_token(mut self, redirect: bool) -> Self {
        self.redirect_on_malformed_token = redirect;
        self
    }

    /// Derive the remember-me sealing key
    pub fn sealing_key(&self) -> AccountResult<SealingKey> {
        Ok(SealingKey::derive(&self.remember_secret)?)
    }

    /// Get remember-me TTL in milliseconds
    pub fn remember_me_ttl_ms(&self) -> i64 {
        self.remember_me_ttl.as_millis() as i64
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("cookies", &self.cookies)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("logged_in_ttl", &self.logged_in_ttl)
            .field("remember_me_ttl", &self.remember_me_ttl)
            .field("remember_secret", &"[REDACTED]")
            .field("redirect_on_malformed_token", &self.redirect_on_malformed_token)
            .finish()
    }
}
