//! Sign Out Use Case
//!
//! Clears the session keys. Remembered credentials are kept for the next
//! login form.

use crate::application::token_store::TokenStore;
use crate::domain::value_object::page::Page;
use crate::error::AccountResult;

/// Sign out use case
pub struct SignOutUseCase {
    store: TokenStore,
}

impl SignOutUseCase {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Sign out and return the page to navigate to
    pub fn execute(&self) -> AccountResult<Page> {
        self.store.clear_session()?;
        tracing::info!("Signed out");
        Ok(Page::Login)
    }
}
