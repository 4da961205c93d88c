//! Infrastructure Layer
//!
//! HTTP implementation of the gateway traits and its wire types.

pub mod dto;
pub mod endpoints;
pub mod http;

pub use endpoints::ApiEndpoints;
pub use http::HttpGateway;
