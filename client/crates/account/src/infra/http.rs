//! HTTP Gateway
//!
//! reqwest implementation of [`AuthGateway`] and [`ProfileGateway`]. The
//! client keeps a cookie store so the CSRF cookie issued with the token is
//! sent back on login.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::entity::{
    credentials::{Credentials, Registration},
    profile::Profile,
    token_set::{SessionCredentials, TokenSet},
};
use crate::domain::gateway::{AuthGateway, ProfileGateway, ProfileResponse};
use crate::error::{AccountError, AccountResult};
use crate::infra::dto::{
    CsrfTokenResponse, ErrorBody, LoginRequest, ProfileEnvelope, RefreshRequest, RefreshResponse,
    RegisterRequest, TokenResponse,
};
use crate::infra::endpoints::ApiEndpoints;

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const REFRESH_TOKEN_HEADER: &str = "app-refresh-token";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpGateway {
    pub fn new(endpoints: ApiEndpoints) -> AccountResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self::with_client(client, endpoints))
    }

    pub fn with_client(client: Client, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Bearer and refresh-token headers
    fn authorized(
        &self,
        request: RequestBuilder,
        credentials: &SessionCredentials,
    ) -> AccountResult<RequestBuilder> {
        let bearer = credentials
            .bearer()
            .ok_or(AccountError::MissingCredentials)?;
        let request = request.bearer_auth(bearer);
        Ok(match credentials.refresh() {
            Some(refresh) => request.header(REFRESH_TOKEN_HEADER, refresh),
            None => request,
        })
    }
}

/// Send and decode a JSON body, mapping non-2xx to [`AccountError::Rejected`]
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> AccountResult<T> {
    let response = checked(request.send().await?).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| AccountError::Decode(e.to_string()))
}

async fn checked(response: Response) -> AccountResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(rejected(status, response).await)
}

async fn rejected(status: StatusCode, response: Response) -> AccountError {
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message),
        Err(_) => None,
    };
    AccountError::Rejected {
        status: status.as_u16(),
        message,
    }
}

impl AuthGateway for HttpGateway {
    async fn fetch_csrf_token(&self) -> AccountResult<String> {
        let body: CsrfTokenResponse = send_json(self.client.get(self.endpoints.csrf_token.clone())).await?;
        Ok(body.csrf_token)
    }

    async fn login(
        &self,
        credentials: &Credentials,
        csrf_token: Option<&str>,
    ) -> AccountResult<TokenSet> {
        let mut request = self.client.post(self.endpoints.login.clone()).json(&LoginRequest {
            login: &credentials.login,
            password: &credentials.password,
        });
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        let body: TokenResponse = send_json(request).await?;
        Ok(TokenSet::new(body.access_token, body.refresh_token))
    }

    async fn register(&self, registration: &Registration) -> AccountResult<TokenSet> {
        let request = self
            .client
            .post(self.endpoints.register.clone())
            .json(&RegisterRequest {
                login: &registration.login,
                password: &registration.password,
                confirm_password: &registration.confirm_password,
            });
        let body: TokenResponse = send_json(request).await?;
        Ok(TokenSet::new(body.access_token, body.refresh_token))
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> AccountResult<String> {
        let request = self
            .client
            .post(self.endpoints.refresh_token.clone())
            .json(&RefreshRequest { refresh_token });
        let body: RefreshResponse = send_json(request).await?;
        Ok(body.access_token)
    }
}

impl ProfileGateway for HttpGateway {
    async fn fetch_profile(
        &self,
        credentials: &SessionCredentials,
    ) -> AccountResult<ProfileResponse> {
        let request = self.authorized(self.client.get(self.endpoints.profile.clone()), credentials)?;
        let envelope: ProfileEnvelope = send_json(request).await?;
        Ok(ProfileResponse {
            status: envelope.status,
            profile: envelope.profile,
        })
    }

    async fn update_profile(
        &self,
        credentials: &SessionCredentials,
        profile: &Profile,
    ) -> AccountResult<()> {
        let request = self
            .authorized(self.client.put(self.endpoints.profile.clone()), credentials)?
            .json(profile);
        checked(request.send().await?).await?;
        Ok(())
    }
}
