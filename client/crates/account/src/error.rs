//! Account Error Types
//!
//! This module provides portal-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::{cookie::CookieError, crypto::CryptoError, jwt::JwtError};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// No usable session credentials
    #[error("Not signed in")]
    MissingCredentials,

    /// The API answered with a non-success HTTP status
    #[error("Request rejected with status {status}")]
    Rejected {
        status: u16,
        /// Server-provided `message` (or `error`) field
        message: Option<String>,
    },

    /// Profile payload carried a non-200 application status
    #[error("Profile service reported status {0}")]
    ProfileStatus(u16),

    /// Network failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Cookie jar read/write failure
    #[error("Cookie storage error: {0}")]
    Storage(#[from] CookieError),

    /// Remember-me cipher failure
    #[error("Remember-me cipher error: {0}")]
    Crypto(#[from] CryptoError),

    /// Access token could not be decoded
    #[error("Malformed access token: {0}")]
    Token(#[from] JwtError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MissingCredentials | AccountError::Token(_) => ErrorKind::Unauthorized,
            AccountError::Rejected { status, .. } | AccountError::ProfileStatus(status) => {
                ErrorKind::from_status(*status)
            }
            AccountError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            AccountError::Transport(_) => ErrorKind::ServiceUnavailable,
            AccountError::Decode(_) => ErrorKind::BadGateway,
            AccountError::Storage(_)
            | AccountError::Crypto(_)
            | AccountError::Config(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Server-provided message, if the API sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AccountError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Banner text: the server's message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Convert to AppError; the message is the server's text when it sent one
    pub fn to_app_error(&self) -> AppError {
        AppError::for_user(self.kind(), self.user_message(&self.to_string()))
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AccountError::Transport(e) => {
                tracing::error!(error = %e, "Account API unreachable");
            }
            AccountError::Decode(msg) => {
                tracing::error!(message = %msg, "Account API response could not be decoded");
            }
            AccountError::Token(e) => {
                tracing::error!(error = %e, "Access token could not be decoded");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::Rejected { status, message } => {
                tracing::warn!(status, message = ?message, "Account API rejected request");
            }
            AccountError::ProfileStatus(status) => {
                tracing::warn!(status, "Profile fetch returned non-200 status");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        err.to_app_error().with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_status() {
        let rejected = AccountError::Rejected {
            status: 401,
            message: None,
        };
        assert_eq!(rejected.kind(), ErrorKind::Unauthorized);
        assert_eq!(AccountError::ProfileStatus(404).kind(), ErrorKind::NotFound);
        assert_eq!(
            AccountError::Decode("x".into()).kind(),
            ErrorKind::BadGateway
        );
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let rejected = AccountError::Rejected {
            status: 400,
            message: Some("User ID already taken".into()),
        };
        assert_eq!(rejected.user_message("fallback"), "User ID already taken");

        let blank = AccountError::Rejected {
            status: 400,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message("fallback"), "fallback");
        assert_eq!(
            AccountError::MissingCredentials.user_message("fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_to_app_error_adds_sign_in_action() {
        let error = AccountError::MissingCredentials.to_app_error();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.banner(), "Not signed in. Please log in again.");

        let error = AccountError::Internal("boom".into()).to_app_error();
        assert_eq!(error.action(), None);
    }

    #[test]
    fn test_into_app_error_keeps_server_message_and_source() {
        let rejected = AccountError::Rejected {
            status: 401,
            message: Some("Session revoked".into()),
        };
        let error = AppError::from(rejected);
        assert_eq!(error.message(), "Session revoked");
        assert_eq!(error.banner(), "Session revoked. Please log in again.");
        assert!(std::error::Error::source(&error).is_some());

        let error = AppError::from(AccountError::ProfileStatus(503));
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
        assert!(error.is_server_error());
        assert_eq!(error.action(), None);
    }
}
