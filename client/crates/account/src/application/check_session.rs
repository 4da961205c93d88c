//! Check Session Use Case
//!
//! Per-page-view session guard: decides whether a page renders, redirects to
//! the login page, or is not found. An expired access token is refreshed
//! once when a refresh token is available.

use std::sync::Arc;

use platform::clock::Clock;
use platform::jwt;
use tokio::sync::Mutex;

use crate::application::config::AccountConfig;
use crate::application::token_store::TokenStore;
use crate::domain::gateway::AuthGateway;
use crate::domain::value_object::page::Page;
use crate::error::AccountError;

/// Session state derived from the stored access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No access token stored
    Missing,
    Valid,
    /// Expired, and a refresh token is available
    ExpiredRefreshing,
    /// Expired, no refresh token
    ExpiredNoRefresh,
    /// Stored token could not be decoded
    Invalid,
}

/// Guard decision for one page view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(Page),
    Redirect(Page),
    NotFound,
}

/// Check session use case
pub struct CheckSessionUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
    store: TokenStore,
    config: Arc<AccountConfig>,
    clock: Arc<dyn Clock>,
    /// Serializes refresh calls
    refresh_lock: Mutex<()>,
}

impl<G> CheckSessionUseCase<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        store: TokenStore,
        config: Arc<AccountConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            store,
            config,
            clock,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Classify the stored session without side effects
    pub fn evaluate(&self) -> SessionState {
        let Some(token) = self.store.access_token() else {
            return SessionState::Missing;
        };
        match jwt::decode_claims(&token) {
            Err(_) => SessionState::Invalid,
            Ok(claims) if claims.is_expired_at(self.clock.now_ms()) => {
                if self.store.refresh_token().is_some() {
                    SessionState::ExpiredRefreshing
                } else {
                    SessionState::ExpiredNoRefresh
                }
            }
            Ok(_) => SessionState::Valid,
        }
    }

    /// Decide the outcome for a page identifier
    ///
    /// Unrecognized identifiers are not found without any auth check.
    pub async fn guard_code(&self, code: &str) -> GuardOutcome {
        match Page::from_code(code) {
            Some(page) => self.guard(page).await,
            None => GuardOutcome::NotFound,
        }
    }

    /// Decide the outcome for a recognized page
    pub async fn guard(&self, page: Page) -> GuardOutcome {
        match self.evaluate() {
            SessionState::Valid => GuardOutcome::Render(page),
            SessionState::Missing if page.requires_auth() => {
                tracing::debug!(page = %page, "No access token, redirecting to login");
                GuardOutcome::Redirect(Page::Login)
            }
            SessionState::Missing => GuardOutcome::Render(page),
            SessionState::Invalid => {
                if let Some(Err(e)) = self.store.access_token().map(|t| jwt::decode_claims(&t)) {
                    AccountError::from(e).log();
                }
                if self.config.redirect_on_malformed_token {
                    self.teardown();
                    GuardOutcome::Redirect(Page::Login)
                } else {
                    GuardOutcome::Render(page)
                }
            }
            SessionState::ExpiredNoRefresh => {
                tracing::info!(page = %page, "Access token expired without refresh token");
                self.teardown();
                GuardOutcome::Redirect(Page::Login)
            }
            SessionState::ExpiredRefreshing => {
                let refreshed = match self.store.access_token() {
                    Some(expired) => self.refresh(&expired).await,
                    None => false,
                };
                if refreshed {
                    GuardOutcome::Render(page)
                } else {
                    GuardOutcome::Redirect(Page::Login)
                }
            }
        }
    }

    /// Single-flight refresh for `expired`
    ///
    /// Callers that waited on the lock see the token written by the first
    /// caller and do not call the API again.
    async fn refresh(&self, expired: &str) -> bool {
        let _guard = self.refresh_lock.lock().await;

        if self.store.access_token().as_deref() != Some(expired) {
            return self.evaluate() == SessionState::Valid;
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            self.teardown();
            return false;
        };

        tracing::info!("Access token expired, refreshing");
        match self.gateway.refresh_access_token(&refresh_token).await {
            Ok(access_token) => match self.store.replace_access_token(&access_token) {
                Ok(()) => {
                    tracing::info!("Access token refreshed");
                    true
                }
                Err(e) => {
                    e.log();
                    self.teardown();
                    false
                }
            },
            Err(e) => {
                e.log();
                tracing::warn!("Token refresh failed, signing out");
                self.teardown();
                false
            }
        }
    }

    fn teardown(&self) {
        if let Err(e) = self.store.clear_session() {
            e.log();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{
        credentials::{Credentials, Registration},
        token_set::TokenSet,
    };
    use crate::error::AccountResult;
    use platform::clock::ManualClock;
    use platform::cookie::MemoryCookieJar;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NOW_MS: i64 = 1_700_000_000_000;

    struct RefreshOnly {
        calls: AtomicUsize,
        succeed: bool,
    }

    impl AuthGateway for RefreshOnly {
        async fn fetch_csrf_token(&self) -> AccountResult<String> {
            unreachable!()
        }

        async fn login(&self, _: &Credentials, _: Option<&str>) -> AccountResult<TokenSet> {
            unreachable!()
        }

        async fn register(&self, _: &Registration) -> AccountResult<TokenSet> {
            unreachable!()
        }

        async fn refresh_access_token(&self, _: &str) -> AccountResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(jwt::encode_unsigned(&json!({ "exp": NOW_MS / 1000 + 3600 })))
            } else {
                Err(AccountError::Rejected {
                    status: 401,
                    message: None,
                })
            }
        }
    }

    fn setup(succeed: bool) -> (CheckSessionUseCase<RefreshOnly>, TokenStore) {
        let clock = Arc::new(ManualClock::new(NOW_MS));
        let config = Arc::new(AccountConfig::development());
        let store = TokenStore::new(Arc::new(MemoryCookieJar::new(clock.clone())), config.clone());
        let gateway = Arc::new(RefreshOnly {
            calls: AtomicUsize::new(0),
            succeed,
        });
        let guard = CheckSessionUseCase::new(gateway, store.clone(), config, clock);
        (guard, store)
    }

    fn token(exp_offset_secs: i64) -> String {
        jwt::encode_unsigned(&json!({ "exp": NOW_MS / 1000 + exp_offset_secs }))
    }

    #[test]
    fn test_evaluate() {
        let (guard, store) = setup(true);
        assert_eq!(guard.evaluate(), SessionState::Missing);

        store.store_token_set(&TokenSet::new(token(60), "r")).unwrap();
        assert_eq!(guard.evaluate(), SessionState::Valid);

        store.replace_access_token(&token(-10)).unwrap();
        assert_eq!(guard.evaluate(), SessionState::ExpiredRefreshing);

        store.remove("APP-REFRESH-TOKEN").unwrap();
        assert_eq!(guard.evaluate(), SessionState::ExpiredNoRefresh);

        store.replace_access_token("not-a-jwt").unwrap();
        assert_eq!(guard.evaluate(), SessionState::Invalid);
    }

    #[tokio::test]
    async fn test_public_pages_without_token() {
        let (guard, _) = setup(true);
        assert_eq!(guard.guard(Page::Login).await, GuardOutcome::Render(Page::Login));
        assert_eq!(
            guard.guard(Page::Register).await,
            GuardOutcome::Render(Page::Register)
        );
        assert_eq!(
            guard.guard(Page::Profile).await,
            GuardOutcome::Redirect(Page::Login)
        );
    }

    #[tokio::test]
    async fn test_unknown_page_skips_auth() {
        let (guard, _) = setup(true);
        assert_eq!(guard.guard_code("settings").await, GuardOutcome::NotFound);
        assert_eq!(
            guard.guard_code("home").await,
            GuardOutcome::Redirect(Page::Login)
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_tears_down_session() {
        let (guard, store) = setup(false);
        store.store_token_set(&TokenSet::new(token(-10), "r")).unwrap();

        assert_eq!(
            guard.guard(Page::Profile).await,
            GuardOutcome::Redirect(Page::Login)
        );
        assert_eq!(guard.gateway.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(!store.is_logged_in());
    }

    #[tokio::test]
    async fn test_malformed_token_renders_by_default() {
        let (guard, store) = setup(true);
        store.store_token_set(&TokenSet::new("garbage", "r")).unwrap();
        assert_eq!(
            guard.guard(Page::Profile).await,
            GuardOutcome::Render(Page::Profile)
        );
        assert_eq!(store.access_token().as_deref(), Some("garbage"));
    }

    #[tokio::test]
    async fn test_malformed_token_redirects_when_configured() {
        let clock = Arc::new(ManualClock::new(NOW_MS));
        let config =
            Arc::new(AccountConfig::development().with_redirect_on_malformed_token(true));
        let store = TokenStore::new(Arc::new(MemoryCookieJar::new(clock.clone())), config.clone());
        let gateway = Arc::new(RefreshOnly {
            calls: AtomicUsize::new(0),
            succeed: true,
        });
        let guard = CheckSessionUseCase::new(gateway, store.clone(), config, clock);

        store.store_token_set(&TokenSet::new("garbage", "r")).unwrap();
        assert_eq!(
            guard.guard(Page::Home).await,
            GuardOutcome::Redirect(Page::Login)
        );
        assert_eq!(store.access_token(), None);
    }

    #[tokio::test]
    async fn test_expired_without_refresh_token() {
        let (guard, store) = setup(true);
        store.replace_access_token(&token(-10)).unwrap();
        assert_eq!(
            guard.guard(Page::Home).await,
            GuardOutcome::Redirect(Page::Login)
        );
        assert_eq!(guard.gateway.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.access_token(), None);
    }
}
