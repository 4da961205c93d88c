//! Entity Module

pub mod credentials;
pub mod profile;
pub mod token_set;
