//! API Endpoints
//!
//! Resolved URLs of the account API. Each path can be overridden by an
//! environment variable; an absolute override is used verbatim.

use reqwest::Url;

use crate::error::{AccountError, AccountResult};

pub const BASE_URL_VAR: &str = "PORTAL_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const CSRF_TOKEN: (&str, &str) = ("PORTAL_API_USER_CSRF_TOKEN", "/api/user/csrf-token");
const LOGIN: (&str, &str) = ("PORTAL_API_USER_LOGIN", "/api/user/login");
const REGISTER: (&str, &str) = ("PORTAL_API_USER_REGISTER", "/api/user/register");
const REFRESH_TOKEN: (&str, &str) = ("PORTAL_API_USER_REFRESH_TOKEN", "/api/user/refresh-token");
const PROFILE: (&str, &str) = ("PORTAL_API_USER_PROFILE", "/api/user/profile");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub csrf_token: Url,
    pub login: Url,
    pub register: Url,
    pub refresh_token: Url,
    pub profile: Url,
}

impl ApiEndpoints {
    /// Default paths under `base_url`
    pub fn new(base_url: &str) -> AccountResult<Self> {
        Self::resolve(base_url, |_| None)
    }

    /// Read the base URL and overrides from the process environment
    pub fn from_env() -> AccountResult<Self> {
        let base_url = std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::resolve(&base_url, |name| std::env::var(name).ok())
    }

    /// Resolve every endpoint, consulting `lookup` for overrides
    pub fn resolve<F>(base_url: &str, lookup: F) -> AccountResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = |(var, default): (&str, &str)| {
            let path = lookup(var)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string());
            endpoint_url(base_url, &path)
        };

        Ok(Self {
            csrf_token: endpoint(CSRF_TOKEN)?,
            login: endpoint(LOGIN)?,
            register: endpoint(REGISTER)?,
            refresh_token: endpoint(REFRESH_TOKEN)?,
            profile: endpoint(PROFILE)?,
        })
    }
}

/// Join `path` onto `base_url`, keeping any path prefix of the base
fn endpoint_url(base_url: &str, path: &str) -> AccountResult<Url> {
    let path = path.trim();
    let raw = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };
    Url::parse(&raw).map_err(|e| AccountError::Config(format!("Invalid API URL {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let endpoints = ApiEndpoints::new("https://api.example.com/").unwrap();
        assert_eq!(
            endpoints.login.as_str(),
            "https://api.example.com/api/user/login"
        );
        assert_eq!(
            endpoints.refresh_token.as_str(),
            "https://api.example.com/api/user/refresh-token"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let endpoints = ApiEndpoints::new("https://example.com/portal").unwrap();
        assert_eq!(
            endpoints.profile.as_str(),
            "https://example.com/portal/api/user/profile"
        );
    }

    #[test]
    fn test_overrides() {
        let endpoints = ApiEndpoints::resolve("http://localhost:8080", |name| match name {
            "PORTAL_API_USER_LOGIN" => Some("/v2/login".to_string()),
            "PORTAL_API_USER_PROFILE" => Some("https://profiles.example.com/me".to_string()),
            "PORTAL_API_USER_REGISTER" => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(endpoints.login.as_str(), "http://localhost:8080/v2/login");
        assert_eq!(endpoints.profile.as_str(), "https://profiles.example.com/me");
        assert_eq!(
            endpoints.register.as_str(),
            "http://localhost:8080/api/user/register"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiEndpoints::new("not a url").unwrap_err();
        assert!(matches!(err, AccountError::Config(_)));
    }
}
