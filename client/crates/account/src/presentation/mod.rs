//! Presentation Layer
//!
//! Route surface, page gate and the profile section renderer.

pub mod middleware;
pub mod render;
pub mod router;
