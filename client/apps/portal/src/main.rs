//! Portal Entry Point
//!
//! Command-line front end for the account portal.
//! Uses `anyhow` for startup errors; command failures are
//! `account::AppError` and end as a one-line banner on stderr.

mod cli;
mod commands;
mod context;
mod field_path;

use std::process::ExitCode;

use account::{ApiEndpoints, AppResult};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, ProfileCommands};
use crate::context::Portal;

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "portal=info,account=info,platform=warn",
        1 => "portal=debug,account=debug,platform=debug",
        _ => "portal=trace,account=trace,platform=trace,reqwest=debug",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(cli.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let endpoints = ApiEndpoints::from_env()?;
    tracing::debug!(login = %endpoints.login, profile = %endpoints.profile, "API endpoints");

    let portal = Portal::open(&cli.cookie_jar, endpoints)?;

    match run(&portal, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            if error.is_server_error() {
                tracing::error!(error = ?error, "Command failed");
            } else {
                tracing::debug!(error = %error, "Command failed");
            }
            eprintln!("{}", error.banner());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(portal: &Portal, command: Commands) -> AppResult<()> {
    match command {
        Commands::Login(args) => commands::login(portal, args).await,
        Commands::Register(args) => commands::register(portal, args).await,
        Commands::Logout => commands::logout(portal),
        Commands::Open { path, section } => commands::open(portal, &path, section).await,
        Commands::Profile(ProfileCommands::Show { section }) => {
            commands::show(portal, section).await
        }
        Commands::Profile(ProfileCommands::Edit(args)) => commands::edit(portal, args).await,
    }
}
