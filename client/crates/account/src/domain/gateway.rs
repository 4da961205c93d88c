//! Gateway Traits
//!
//! Interfaces to the remote account API. Implementation is in infrastructure layer.

use crate::domain::entity::{
    credentials::{Credentials, Registration},
    profile::Profile,
    token_set::{SessionCredentials, TokenSet},
};
use crate::error::AccountResult;

/// Status the profile endpoint reports in its body on success
pub const PROFILE_STATUS_OK: u16 = 200;

/// Profile read result
///
/// The HTTP call may succeed while `status` still signals an application
/// level failure; only [`PROFILE_STATUS_OK`] carries a usable profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileResponse {
    pub status: u16,
    pub profile: Option<Profile>,
}

impl ProfileResponse {
    pub fn ok(profile: Profile) -> Self {
        Self {
            status: PROFILE_STATUS_OK,
            profile: Some(profile),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == PROFILE_STATUS_OK
    }
}

/// Authentication endpoints
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Fetch a CSRF token for the login form
    async fn fetch_csrf_token(&self) -> AccountResult<String>;

    /// Exchange login and password for a token set
    async fn login(
        &self,
        credentials: &Credentials,
        csrf_token: Option<&str>,
    ) -> AccountResult<TokenSet>;

    /// Create an account and sign in
    async fn register(&self, registration: &Registration) -> AccountResult<TokenSet>;

    /// Exchange a refresh token for a new access token
    async fn refresh_access_token(&self, refresh_token: &str) -> AccountResult<String>;
}

/// Profile endpoints
#[trait_variant::make(ProfileGateway: Send)]
pub trait LocalProfileGateway {
    /// Read the signed-in user's profile
    async fn fetch_profile(&self, credentials: &SessionCredentials)
    -> AccountResult<ProfileResponse>;

    /// Replace the signed-in user's profile with `profile`
    async fn update_profile(
        &self,
        credentials: &SessionCredentials,
        profile: &Profile,
    ) -> AccountResult<()>;
}
