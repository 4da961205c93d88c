//! Profile Draft Controller
//!
//! Holds the committed profile (last state known to match the server) and
//! an editable draft of it. Edits go through [`ProfileCommand`]; validation
//! is scoped to one section; saves send the full draft.
//!
//! Loads are tagged with a generation number. Only the most recently issued
//! load may apply its response, so rapid edit toggles cannot leave an older
//! profile on screen.

use std::sync::Arc;

use kernel::error::{app_error::AppError, kind::ErrorKind};

use crate::domain::entity::{profile::Profile, token_set::SessionCredentials};
use crate::domain::gateway::{ProfileGateway, ProfileResponse};
use crate::domain::value_object::{
    profile_command::{ListOp, ProfileCommand},
    profile_field::{FieldKey, PreferenceList},
    profile_section::ProfileSection,
    validation_errors::ValidationErrors,
};
use crate::error::{AccountError, AccountResult};

pub const LOAD_FAILED_MESSAGE: &str = "Your profile could not be loaded.";
pub const SAVE_FAILED_MESSAGE: &str = "Your changes could not be saved. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// No usable credentials; nothing was requested
    NoCredentials,
    Failed { kind: ErrorKind, message: String },
}

impl LoadState {
    /// Banner for a load that left nothing to show
    pub fn to_app_error(&self) -> Option<AppError> {
        match self {
            LoadState::NoCredentials => Some(AccountError::MissingCredentials.to_app_error()),
            LoadState::Failed { kind, message } => {
                Some(AppError::for_user(*kind, message.clone()))
            }
            _ => None,
        }
    }
}

/// Proof of an issued load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Validation failed; see [`ProfileDraftController::errors`]
    Invalid,
    Failed { kind: ErrorKind, message: String },
}

/// Borrowed snapshot for rendering
#[derive(Debug, Clone, Copy)]
pub struct ProfileViewState<'a> {
    pub draft: Option<&'a Profile>,
    pub errors: &'a ValidationErrors,
    pub editing: bool,
    pub loading: bool,
}

pub struct ProfileDraftController<G>
where
    G: ProfileGateway + Send + Sync + 'static,
{
    gateway: Arc<G>,
    /// Last fetch result; cleared when a load finds no credentials or fails
    fetched: Option<Profile>,
    committed: Option<Profile>,
    draft: Option<Profile>,
    editing: bool,
    errors: ValidationErrors,
    load_state: LoadState,
    save_error: Option<String>,
    generation: u64,
}

impl<G> ProfileDraftController<G>
where
    G: ProfileGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            fetched: None,
            committed: None,
            draft: None,
            editing: false,
            errors: ValidationErrors::new(),
            load_state: LoadState::Idle,
            save_error: None,
            generation: 0,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.fetched.as_ref()
    }

    pub fn committed(&self) -> Option<&Profile> {
        self.committed.as_ref()
    }

    pub fn draft(&self) -> Option<&Profile> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn view_state(&self) -> ProfileViewState<'_> {
        ProfileViewState {
            draft: self.draft.as_ref(),
            errors: &self.errors,
            editing: self.editing,
            loading: self.load_state == LoadState::Loading,
        }
    }

    /// Fetch and apply the remote profile
    pub async fn load(&mut self, credentials: &SessionCredentials) {
        let Some(ticket) = self.begin_load(credentials) else {
            return;
        };
        let gateway = Arc::clone(&self.gateway);
        let result = gateway.fetch_profile(credentials).await;
        self.finish_load(ticket, result);
    }

    /// Issue a load. Returns `None`, without any request, when the
    /// credentials are absent or malformed.
    pub fn begin_load(&mut self, credentials: &SessionCredentials) -> Option<LoadTicket> {
        if credentials.bearer().is_none() {
            tracing::debug!("No usable access token, skipping profile load");
            self.fetched = None;
            self.load_state = LoadState::NoCredentials;
            return None;
        }
        self.generation += 1;
        self.load_state = LoadState::Loading;
        Some(LoadTicket(self.generation))
    }

    /// Apply a load response. Returns `false` for a superseded ticket.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: AccountResult<ProfileResponse>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded profile response"
            );
            return false;
        }

        match result {
            Ok(response) if response.is_ok() => {
                let profile = response.profile.unwrap_or_default();
                self.fetched = Some(profile.clone());
                self.committed = Some(profile.clone());
                self.draft = Some(profile);
                self.load_state = LoadState::Loaded;
            }
            Ok(response) => {
                let error = AccountError::ProfileStatus(response.status);
                error.log();
                self.load_state = LoadState::Failed {
                    kind: error.kind(),
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
            Err(e) => {
                e.log();
                self.fetched = None;
                self.load_state = LoadState::Failed {
                    kind: e.kind(),
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Apply an edit to the draft and clear that field's error
    ///
    /// Returns `false` when there is no draft or the list position does not
    /// exist.
    pub fn apply(&mut self, command: ProfileCommand) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let applied = draft.apply(&command);
        if applied {
            self.errors.remove(&command.field_key());
        } else {
            tracing::debug!(field = %command.field_key(), "Edit addressed a missing list entry");
        }
        applied
    }

    /// Set a scalar field
    pub fn edit(&mut self, field: FieldKey, value: impl Into<String>) -> bool {
        match ProfileCommand::set(field, value) {
            Some(command) => self.apply(command),
            None => false,
        }
    }

    pub fn add_list_item(&mut self, list: PreferenceList) -> bool {
        self.apply(ProfileCommand::PreferenceList {
            list,
            op: ListOp::Add,
        })
    }

    pub fn remove_list_item(&mut self, list: PreferenceList, index: usize) -> bool {
        self.apply(ProfileCommand::PreferenceList {
            list,
            op: ListOp::Remove { index },
        })
    }

    pub fn set_list_item(
        &mut self,
        list: PreferenceList,
        index: usize,
        value: impl Into<String>,
    ) -> bool {
        self.apply(ProfileCommand::PreferenceList {
            list,
            op: ListOp::Set {
                index,
                value: value.into(),
            },
        })
    }

    /// Replace the errors with the section's rule results
    pub fn validate(&mut self, section: ProfileSection) -> bool {
        self.errors = match &self.draft {
            Some(draft) => draft.validate(section),
            None => Profile::default().validate(section),
        };
        self.errors.is_empty()
    }

    /// Validate the section and send the full draft
    pub async fn save(
        &mut self,
        section: ProfileSection,
        credentials: &SessionCredentials,
    ) -> SaveOutcome {
        self.save_error = None;

        if !self.validate(section) {
            tracing::debug!(section = %section, errors = self.errors.len(), "Profile draft invalid");
            return SaveOutcome::Invalid;
        }
        let Some(draft) = self.draft.clone() else {
            return SaveOutcome::Invalid;
        };

        let result = if credentials.bearer().is_none() {
            Err(AccountError::MissingCredentials)
        } else {
            let gateway = Arc::clone(&self.gateway);
            gateway.update_profile(credentials, &draft).await
        };

        match result {
            Ok(()) => {
                tracing::info!(section = %section, "Profile saved");
                self.committed = Some(draft);
                self.editing = false;
                self.errors.clear();
                SaveOutcome::Saved
            }
            Err(e) => {
                e.log();
                self.save_error = Some(SAVE_FAILED_MESSAGE.to_string());
                SaveOutcome::Failed {
                    kind: e.kind(),
                    message: SAVE_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Discard edits, leave edit mode and reload
    pub async fn cancel(&mut self, credentials: &SessionCredentials) {
        self.errors.clear();
        self.save_error = None;
        self.draft = self.committed.clone();
        self.editing = false;
        self.load(credentials).await;
    }

    /// Flip edit mode and reload so editing starts from the server state
    pub async fn toggle_edit(&mut self, credentials: &SessionCredentials) {
        self.errors.clear();
        self.save_error = None;
        self.editing = !self.editing;
        self.load(credentials).await;
    }
}
