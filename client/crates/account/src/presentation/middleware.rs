//! Page Gate
//!
//! Resolves a path and runs the session guard for it.

use std::sync::Arc;

use crate::application::check_session::{CheckSessionUseCase, GuardOutcome};
use crate::domain::gateway::AuthGateway;
use crate::domain::value_object::page::Page;
use crate::presentation::router::Route;

/// Where a navigation ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Render(Page),
    Redirect(Page),
    NotFound,
}

impl From<GuardOutcome> for GateDecision {
    fn from(outcome: GuardOutcome) -> Self {
        match outcome {
            GuardOutcome::Render(page) => GateDecision::Render(page),
            GuardOutcome::Redirect(page) => GateDecision::Redirect(page),
            GuardOutcome::NotFound => GateDecision::NotFound,
        }
    }
}

pub struct PageGate<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    guard: Arc<CheckSessionUseCase<G>>,
}

impl<G> Clone for PageGate<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            guard: Arc::clone(&self.guard),
        }
    }
}

impl<G> PageGate<G>
where
    G: AuthGateway + Send + Sync + 'static,
{
    pub fn new(guard: Arc<CheckSessionUseCase<G>>) -> Self {
        Self { guard }
    }

    /// Unknown routes are not found without consulting the session
    pub async fn resolve(&self, path: &str) -> GateDecision {
        match Route::parse(path) {
            Route::Page(page) => {
                let decision = GateDecision::from(self.guard.guard(page).await);
                tracing::debug!(path, decision = ?decision, "Page gate");
                decision
            }
            Route::UnknownPage(_) | Route::NotFound => GateDecision::NotFound,
        }
    }
}
