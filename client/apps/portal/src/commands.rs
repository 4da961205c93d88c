//! Command Handlers
//!
//! Failures come back as [`AppError`]; `main` prints the banner.

use account::application::{LoadState, LoginMount, SaveOutcome};
use account::domain::entity::credentials::{Credentials, Registration};
use account::domain::value_object::{page::Page, profile_section::ProfileSection};
use account::presentation::{middleware::GateDecision, render::render_section};
use account::{AccountError, AppError, AppResult};

use crate::cli::{EditArgs, LoginArgs, RegisterArgs};
use crate::context::Portal;

pub async fn login(portal: &Portal, args: LoginArgs) -> AppResult<()> {
    let mut form = portal.sign_in()?;

    let prefill = match form.mount().await? {
        LoginMount::AlreadySignedIn(page) => {
            println!("Already signed in. Continue at {}", page.path());
            return Ok(());
        }
        LoginMount::Ready(prefill) => prefill,
    };

    let credentials = match (args.login, args.password, prefill) {
        (Some(login), Some(password), _) => Credentials::new(login, password, args.remember),
        (None, None, Some(remembered)) => {
            println!("Using remembered credentials for {}", remembered.login);
            remembered
        }
        (login, password, _) => Credentials::new(
            login.unwrap_or_default(),
            password.unwrap_or_default(),
            args.remember,
        ),
    };

    let page = form.submit(&credentials).await.into_result()?;
    println!("Signed in. Continue at {}", page.path());
    Ok(())
}

pub async fn register(portal: &Portal, args: RegisterArgs) -> AppResult<()> {
    let registration = Registration::new(args.login, args.password, args.confirm_password);
    let page = portal.sign_up().submit(&registration).await.into_result()?;
    println!("Registered and signed in. Continue at {}", page.path());
    Ok(())
}

pub fn logout(portal: &Portal) -> AppResult<()> {
    let page = portal.sign_out().execute()?;
    println!("Signed out. Continue at {}", page.path());
    Ok(())
}

pub async fn open(portal: &Portal, path: &str, section: ProfileSection) -> AppResult<()> {
    match portal.page_gate().resolve(path).await {
        GateDecision::Render(Page::Profile) => show(portal, section).await,
        GateDecision::Render(Page::Login) if portal.store().is_logged_in() => {
            println!("Already signed in. Continue at {}", Page::Profile.path());
            Ok(())
        }
        GateDecision::Render(page) => {
            println!("{}", page_banner(page));
            Ok(())
        }
        GateDecision::Redirect(page) => {
            println!("Redirected to {}", page.path());
            Ok(())
        }
        GateDecision::NotFound => Err(AppError::not_found(format!(
            "404 - Page not found: {path}"
        ))),
    }
}

pub async fn show(portal: &Portal, section: ProfileSection) -> AppResult<()> {
    if !require_profile_access(portal).await {
        return Ok(());
    }
    let mut draft = portal.profile();
    draft.load(&portal.store().credentials()).await;
    if let Some(error) = draft.load_state().to_app_error() {
        return Err(error);
    }
    print!("{}", render_section(section, &draft.view_state()));
    Ok(())
}

pub async fn edit(portal: &Portal, args: EditArgs) -> AppResult<()> {
    if !require_profile_access(portal).await {
        return Ok(());
    }
    let mut draft = portal.profile();
    let credentials = portal.store().credentials();

    // entering edit mode always reloads
    draft.toggle_edit(&credentials).await;
    if let Some(error) = draft.load_state().to_app_error() {
        return Err(error);
    }
    if draft.load_state() != &LoadState::Loaded {
        return Err(AccountError::Internal("profile load did not finish".into()).into());
    }

    let skipped = args.apply_to(&mut draft);
    if skipped > 0 {
        println!("{skipped} edit(s) addressed a missing list entry and were skipped");
    }

    match draft.save(args.section, &credentials).await {
        SaveOutcome::Saved => {
            println!("Saved.");
            print!("{}", render_section(args.section, &draft.view_state()));
            Ok(())
        }
        SaveOutcome::Invalid => {
            print!("{}", render_section(args.section, &draft.view_state()));
            Err(AppError::bad_request("Please correct the highlighted fields"))
        }
        SaveOutcome::Failed { kind, message } => Err(AppError::for_user(kind, message)),
    }
}

/// Run the session guard for the profile page
async fn require_profile_access(portal: &Portal) -> bool {
    match portal.page_gate().resolve(Page::Profile.path()).await {
        GateDecision::Render(_) => true,
        GateDecision::Redirect(page) => {
            println!("Redirected to {}", page.path());
            false
        }
        GateDecision::NotFound => false,
    }
}

fn page_banner(page: Page) -> &'static str {
    match page {
        Page::Home => "Home",
        Page::Profile => "Profile",
        Page::Login => "Login: run `portal login --user <ID> --password <PASSWORD>`",
        Page::Register => "Register: run `portal register --user <ID> --password <PASSWORD> --confirm-password <PASSWORD>`",
    }
}
