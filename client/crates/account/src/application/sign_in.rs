//! Sign In Use Case
//!
//! Login form: mount-time redirect and pre-fill, CSRF token, submission and
//! remember-me persistence.

use std::sync::Arc;

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

use crate::application::busy::BusyFlag;
use crate::application::remember_me::RememberMe;
use crate::application::token_store::TokenStore;
use crate::domain::entity::credentials::Credentials;
use crate::domain::gateway::AuthGateway;
use crate::domain::value_object::page::Page;
use crate::error::AccountResult;

pub const MISSING_FIELDS_MESSAGE: &str = "Please enter your User ID and password";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Page shown after a successful sign-in
pub const SIGNED_IN_PAGE: Page = Page::Profile;

/// Login form state after mount
#[derive(Debug, PartialEq, Eq)]
pub enum LoginMount {
    /// Already signed in; navigate instead of showing the form
    AlreadySignedIn(Page),
    /// Show the form, pre-filled when credentials were remembered
    Ready(Option<Credentials>),
}

/// Result of an auth form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Local rule failed; nothing was sent
    Invalid(String),
    /// The API call failed
    Failed { kind: ErrorKind, message: String },
    SignedIn(Page),
}

impl FormOutcome {
    /// Page to continue at, or the banner to show on the form
    pub fn into_result(self) -> AppResult<Page> {
        match self {
            FormOutcome::SignedIn(page) => Ok(page),
            FormOutcome::Invalid(message) => Err(AppError::bad_request(message)),
            FormOutcome::Failed { kind, message } => Err(AppError::new(kind, message)),
        }
    }
}

/// Sign in use case
pub struct SignInUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
    store: TokenStore,
    remember: RememberMe,
    csrf_token: Option<String>,
    submitting: BusyFlag,
    message: Option<String>,
}

impl<G> SignInUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, store: TokenStore, remember: RememberMe) -> Self {
        Self {
            gateway,
            store,
            remember,
            csrf_token: None,
            submitting: BusyFlag::new(),
            message: None,
        }
    }

    /// Prepare the form
    ///
    /// A CSRF fetch failure is logged and the form continues without one.
    pub async fn mount(&mut self) -> AccountResult<LoginMount> {
        if self.store.is_logged_in() {
            tracing::debug!("Already signed in, skipping login form");
            return Ok(LoginMount::AlreadySignedIn(SIGNED_IN_PAGE));
        }

        let prefill = self.remember.recall()?;

        match self.gateway.fetch_csrf_token().await {
            Ok(token) => self.csrf_token = Some(token),
            Err(e) => {
                e.log();
                tracing::warn!("CSRF token unavailable, continuing without it");
                self.csrf_token = None;
            }
        }

        Ok(LoginMount::Ready(prefill))
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Observer handle for the in-flight indicator
    pub fn submitting(&self) -> BusyFlag {
        self.submitting.clone()
    }

    /// Banner text of the last submission
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub async fn submit(&mut self, credentials: &Credentials) -> FormOutcome {
        self.message = None;

        if !credentials.is_complete() {
            self.message = Some(MISSING_FIELDS_MESSAGE.to_string());
            return FormOutcome::Invalid(MISSING_FIELDS_MESSAGE.to_string());
        }

        let result = {
            let _busy = self.submitting.hold();
            self.gateway
                .login(credentials, self.csrf_token.as_deref())
                .await
        };

        match result.and_then(|tokens| self.store.store_token_set(&tokens)) {
            Ok(()) => {
                tracing::info!(login = %credentials.login, "Signed in");
                self.update_remembered(credentials);
                FormOutcome::SignedIn(SIGNED_IN_PAGE)
            }
            Err(e) => {
                e.log();
                let message = e.user_message(LOGIN_FAILED_MESSAGE);
                self.message = Some(message.clone());
                FormOutcome::Failed {
                    kind: e.kind(),
                    message,
                }
            }
        }
    }

    /// Store or drop the remembered credentials after a sign-in
    ///
    /// The session is already stored, so a failure here only loses the
    /// pre-fill for the next visit.
    fn update_remembered(&self, credentials: &Credentials) {
        let result = if credentials.remember_me {
            self.remember.remember(credentials)
        } else {
            self.remember.forget()
        };
        if let Err(e) = result {
            e.log();
            tracing::warn!("Remembered credentials not updated");
        }
    }
}
