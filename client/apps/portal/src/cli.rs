//! Command Line Definition

use std::path::PathBuf;

use account::application::profile_draft::ProfileDraftController;
use account::domain::gateway::ProfileGateway;
use account::domain::value_object::{
    profile_command::ProfileCommand, profile_field::PreferenceList,
    profile_section::ProfileSection,
};
use clap::{Args, Parser, Subcommand};

use crate::field_path;

/// Account portal client
#[derive(Parser)]
#[command(name = "portal", version)]
#[command(about = "Sign in and manage your profile from the terminal", long_about = None)]
pub struct Cli {
    /// Cookie jar file holding the session
    #[arg(long, env = "PORTAL_COOKIE_JAR", default_value = ".portal/cookies.json")]
    pub cookie_jar: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in; without arguments the remembered credentials are used
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out of the current session
    Logout,

    /// Navigate to a page, as the browser would
    Open {
        /// Path such as /profile or /login
        path: String,

        /// Profile section to show
        #[arg(long, default_value = "basic")]
        section: ProfileSection,
    },

    /// Profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Args)]
pub struct LoginArgs {
    /// User ID
    #[arg(long = "user")]
    pub login: Option<String>,

    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Remember the credentials for the next login
    #[arg(long)]
    pub remember: bool,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long = "user")]
    pub login: String,

    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show one section of the profile
    Show {
        #[arg(long, default_value = "basic")]
        section: ProfileSection,
    },

    /// Edit a section and save it
    Edit(EditArgs),
}

/// Edits are applied in the order: --set, --add, --item, --remove
#[derive(Args)]
pub struct EditArgs {
    /// Section validated on save
    #[arg(long)]
    pub section: ProfileSection,

    /// Set a field, e.g. first_name=Ana or home_address.city=Lisbon
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = field_path::parse_assignment)]
    pub set: Vec<ProfileCommand>,

    /// Append an empty entry to a preference list
    #[arg(long = "add", value_name = "LIST", value_parser = field_path::parse_list)]
    pub add: Vec<PreferenceList>,

    /// Set a preference entry, e.g. hobbies:0=chess
    #[arg(long = "item", value_name = "LIST:INDEX=VALUE", value_parser = field_path::parse_item)]
    pub item: Vec<ProfileCommand>,

    /// Remove a preference entry, e.g. movies:1
    #[arg(long = "remove", value_name = "LIST:INDEX", value_parser = field_path::parse_removal)]
    pub remove: Vec<ProfileCommand>,
}

impl EditArgs {
    /// Apply every edit to the draft; returns how many did not apply
    pub fn apply_to<G>(&self, draft: &mut ProfileDraftController<G>) -> usize
    where
        G: ProfileGateway + Send + Sync + 'static,
    {
        let adds = self.add.iter().map(|list| field_path::add_command(*list));
        let commands = self
            .set
            .iter()
            .cloned()
            .chain(adds)
            .chain(self.item.iter().cloned())
            .chain(self.remove.iter().cloned());

        let mut skipped = 0;
        for command in commands {
            let field = command.field_key();
            if !draft.apply(command) {
                tracing::warn!(field = %field, "Edit did not apply");
                skipped += 1;
            }
        }
        skipped
    }
}
