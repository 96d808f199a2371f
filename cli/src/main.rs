//! `sphere-admin`: terminal front-end for the ReactoSphere admin panel.

mod cli;
mod commands;
mod context;
mod format;
mod output;
mod timing;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as _;
use tracing::error;

use crate::cli::{Cli, Commands, UsersCommand};
use crate::context::AppContext;
use crate::output::Output;

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        commands::generate_completions(shell);
        return Ok(());
    }

    let ctx = AppContext::from_env(cli.api_url)?;

    match cli.command {
        Commands::Login { email } => commands::run_login(&ctx, email).await,
        Commands::Logout => commands::run_logout(&ctx),
        Commands::Whoami => commands::run_whoami(&ctx),
        Commands::Open { path } => commands::run_open(&ctx, &path),
        Commands::Stats => commands::run_stats(&ctx).await,
        Commands::Roles => commands::run_roles(&ctx).await,
        Commands::Users(UsersCommand::List { page }) => commands::run_users_list(&ctx, page).await,
        Commands::Users(UsersCommand::View { id }) => commands::run_users_view(&ctx, id).await,
        Commands::Users(UsersCommand::Create(args)) => {
            commands::run_users_create(&ctx, args).await
        }
        Commands::Users(UsersCommand::Browse) => commands::run_users_browse(&ctx).await,
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            Output::new().error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
