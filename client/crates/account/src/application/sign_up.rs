//! Sign Up Use Case
//!
//! Registration form. Success persists the session the same way sign-in
//! does; there is no remember-me here.

use std::sync::Arc;

use crate::application::busy::BusyFlag;
use crate::application::sign_in::{FormOutcome, SIGNED_IN_PAGE};
use crate::application::token_store::TokenStore;
use crate::domain::entity::credentials::Registration;
use crate::domain::gateway::AuthGateway;

pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

/// Sign up use case
pub struct SignUpUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
    store: TokenStore,
    submitting: BusyFlag,
    message: Option<String>,
}

impl<G> SignUpUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, store: TokenStore) -> Self {
        Self {
            gateway,
            store,
            submitting: BusyFlag::new(),
            message: None,
        }
    }

    pub fn submitting(&self) -> BusyFlag {
        self.submitting.clone()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub async fn submit(&mut self, registration: &Registration) -> FormOutcome {
        self.message = None;

        if let Err(message) = registration.check() {
            self.message = Some(message.to_string());
            return FormOutcome::Invalid(message.to_string());
        }

        let result = {
            let _busy = self.submitting.hold();
            self.gateway.register(registration).await
        };

        match result.and_then(|tokens| self.store.store_token_set(&tokens)) {
            Ok(()) => {
                tracing::info!(login = %registration.login, "Registered and signed in");
                FormOutcome::SignedIn(SIGNED_IN_PAGE)
            }
            Err(e) => {
                e.log();
                let message = e.user_message(REGISTRATION_FAILED_MESSAGE);
                self.message = Some(message.clone());
                FormOutcome::Failed {
                    kind: e.kind(),
                    message,
                }
            }
        }
    }
}
