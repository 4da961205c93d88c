//! Application Layer
//!
//! Use cases and application services.

pub mod busy;
pub mod check_session;
pub mod config;
pub mod profile_draft;
pub mod remember_me;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token_store;

// Re-exports
pub use busy::BusyFlag;
pub use check_session::{CheckSessionUseCase, GuardOutcome, SessionState};
pub use config::AccountConfig;
pub use profile_draft::{LoadState, ProfileDraftController, ProfileViewState, SaveOutcome};
pub use remember_me::RememberMe;
pub use sign_in::{FormOutcome, LoginMount, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::SignUpUseCase;
pub use token_store::TokenStore;
