//! Account Portal Client
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, gateway traits
//! - `application/` - Use cases and application services
//! - `infra/` - HTTP gateway implementation
//! - `presentation/` - Route surface, page gate, section renderer
//!
//! ## Features
//! - Login and registration with optional remember-me pre-fill
//! - Cookie-backed session tokens with a single-flight refresh
//! - Per-page session guard
//! - Editable multi-section profile with draft/committed copies
//!
//! ## Security Model
//! - Remembered credentials are sealed with AES-256-GCM under a build-time secret
//! - Tokens and passwords never appear in logs or `Debug` output
//! - Access-token expiry is read from the JWT payload; signatures are the server's concern

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::{endpoints::ApiEndpoints, http::HttpGateway};
pub use presentation::render::render_section;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
