//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the portal client:
//! - Clock abstraction (system and manually driven)
//! - Persisted cookie jar with per-entry expiry
//! - Cryptographic utilities (SHA-256, Base64, AES-256-GCM sealing)
//! - Unverified JWT claim decoding for client-side expiry checks

pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod jwt;
