//! Session commands: login, logout, whoami.

use anyhow::{Context as _, Result, anyhow};
use inquire::{Password, PasswordDisplayMode, Text};
use sphere_business::LoginStatus;
use tracing::{info, instrument};

use crate::context::AppContext;
use crate::format::view_error;
use crate::output::Output;

#[instrument(skip_all, name = "login")]
pub async fn run_login(ctx: &AppContext, email: Option<String>) -> Result<()> {
    let out = Output::new();
    out.header("Sign in to ReactoSphere Admin");
    out.newline();

    let email = match email {
        Some(email) => email,
        None => Text::new("Email:")
            .prompt()
            .context("Failed to read email")?,
    };
    let password = Password::new("Password:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read password")?;

    let mut login = ctx.login_controller();
    login.input.email = email;
    login.input.password = password;
    login.submit();
    login.settle().await;

    match login.status() {
        LoginStatus::LoggedIn(session) => {
            info!(user_id = session.user.id, "logged in");
            out.success(format!(
                "Signed in as {} <{}>",
                session.user.full_name(),
                session.user.email
            ));
            Ok(())
        }
        LoginStatus::Failed(err) => Err(anyhow!("Login failed: {}", view_error(err))),
        LoginStatus::Idle | LoginStatus::Submitting => Err(anyhow!("Login did not complete")),
    }
}

#[instrument(skip_all, name = "logout")]
pub fn run_logout(ctx: &AppContext) -> Result<()> {
    let out = Output::new();
    if !ctx.session.is_active() {
        out.dim("Not signed in.");
        return Ok(());
    }

    ctx.services.auth.logout()?;
    out.success("Signed out");
    Ok(())
}

pub fn run_whoami(ctx: &AppContext) -> Result<()> {
    let out = Output::new();
    match ctx.session.session() {
        Some(session) => {
            out.print(format!("{} <{}>", session.user.full_name(), session.user.email));
            out.labeled("User ID", session.user.id);
            out.labeled("API", &ctx.config.api_base_url);
        }
        None if ctx.session.is_active() => {
            out.warning("A token is stored but the cached profile is unreadable.");
        }
        None => out.dim("Not signed in."),
    }
    Ok(())
}
