//! Remember Me
//!
//! Encrypted login/password cache used to pre-fill the login form. The
//! stored expiry timestamp is checked independently of the cookie TTL.

use std::sync::Arc;

use platform::clock::Clock;
use platform::crypto::{self, SealingKey};

use crate::application::config::AccountConfig;
use crate::application::token_store::TokenStore;
use crate::domain::entity::credentials::Credentials;
use crate::error::AccountResult;

#[derive(Clone)]
pub struct RememberMe {
    store: TokenStore,
    key: SealingKey,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl RememberMe {
    pub fn new(
        store: TokenStore,
        config: &AccountConfig,
        clock: Arc<dyn Clock>,
    ) -> AccountResult<Self> {
        Ok(Self {
            store,
            key: config.sealing_key()?,
            clock,
            ttl_ms: config.remember_me_ttl_ms(),
        })
    }

    /// Persist the pair with an expiry of now + TTL
    pub fn remember(&self, credentials: &Credentials) -> AccountResult<()> {
        let sealed_login = crypto::seal(&self.key, &credentials.login)?;
        let sealed_password = crypto::seal(&self.key, &credentials.password)?;
        let expires_at_ms = self.clock.now_ms() + self.ttl_ms;
        self.store
            .store_remembered(&sealed_login, &sealed_password, expires_at_ms)?;
        tracing::debug!(expires_at_ms, "Remembered credentials stored");
        Ok(())
    }

    pub fn forget(&self) -> AccountResult<()> {
        self.store.clear_remembered()
    }

    /// Credentials for pre-fill, with `remember_me` checked
    ///
    /// Expired, incomplete or undecryptable records are purged and read as
    /// `None`.
    pub fn recall(&self) -> AccountResult<Option<Credentials>> {
        let record = self.store.remembered();
        if record.is_empty() {
            return Ok(None);
        }

        let expires_at_ms = record
            .expires
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        let now_ms = self.clock.now_ms();

        match expires_at_ms {
            Some(expires_at_ms) if expires_at_ms > now_ms => {}
            _ => {
                tracing::info!("Remembered credentials expired, clearing");
                self.forget()?;
                return Ok(None);
            }
        }

        let (Some(sealed_login), Some(sealed_password)) =
            (record.sealed_login, record.sealed_password)
        else {
            tracing::warn!("Remembered credentials incomplete, clearing");
            self.forget()?;
            return Ok(None);
        };

        let opened = crypto::open(&self.key, &sealed_login)
            .and_then(|login| Ok((login, crypto::open(&self.key, &sealed_password)?)));
        match opened {
            Ok((login, password)) => Ok(Some(Credentials::new(login, password, true))),
            Err(e) => {
                tracing::warn!(error = %e, "Remembered credentials unreadable, clearing");
                self.forget()?;
                Ok(None)
            }
        }
    }
}
