//! Portal Context
//!
//! Wires configuration, the cookie jar and the HTTP gateway into the
//! account use cases.

use std::path::Path;
use std::sync::Arc;

use account::application::{
    AccountConfig, CheckSessionUseCase, ProfileDraftController, RememberMe, SignInUseCase,
    SignOutUseCase, SignUpUseCase, TokenStore,
};
use account::presentation::middleware::PageGate;
use account::{AccountResult, ApiEndpoints, HttpGateway};
use platform::clock::{Clock, SystemClock};
use platform::cookie::FileCookieJar;

pub struct Portal {
    config: Arc<AccountConfig>,
    clock: Arc<dyn Clock>,
    store: TokenStore,
    gateway: Arc<HttpGateway>,
}

impl Portal {
    pub fn open(cookie_jar: &Path, endpoints: ApiEndpoints) -> anyhow::Result<Self> {
        let config = Arc::new(AccountConfig::from_build_env()?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let jar = FileCookieJar::open(cookie_jar, clock.clone())?;

        let store = TokenStore::new(Arc::new(jar), config.clone());
        let gateway = Arc::new(HttpGateway::new(endpoints)?);

        Ok(Self {
            config,
            clock,
            store,
            gateway,
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn page_gate(&self) -> PageGate<HttpGateway> {
        PageGate::new(Arc::new(CheckSessionUseCase::new(
            self.gateway.clone(),
            self.store.clone(),
            self.config.clone(),
            self.clock.clone(),
        )))
    }

    pub fn sign_in(&self) -> AccountResult<SignInUseCase<HttpGateway>> {
        let remember = RememberMe::new(self.store.clone(), &self.config, self.clock.clone())?;
        Ok(SignInUseCase::new(
            self.gateway.clone(),
            self.store.clone(),
            remember,
        ))
    }

    pub fn sign_up(&self) -> SignUpUseCase<HttpGateway> {
        SignUpUseCase::new(self.gateway.clone(), self.store.clone())
    }

    pub fn sign_out(&self) -> SignOutUseCase {
        SignOutUseCase::new(self.store.clone())
    }

    pub fn profile(&self) -> ProfileDraftController<HttpGateway> {
        ProfileDraftController::new(self.gateway.clone())
    }
}
