//! Domain Layer
//!
//! Contains entities, value objects, and the gateway traits through which the
//! portal reaches the remote account API.

pub mod entity;
pub mod gateway;
pub mod value_object;

// Re-exports
pub use entity::{
    credentials::{Credentials, Registration},
    profile::Profile,
    token_set::{SessionCredentials, TokenSet},
};
pub use gateway::{AuthGateway, ProfileGateway, ProfileResponse};
