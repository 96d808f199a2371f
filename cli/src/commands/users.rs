//! User-management commands, all driven through `UserListController`.

use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use sphere_business::{
    DashboardTab, NewUserForm, ProfilePicture, Role, Route, UserListController, UserProfile,
};
use tracing::{debug, instrument};

use crate::cli::CreateUserArgs;
use crate::context::AppContext;
use crate::format::{format_timestamp, pager_line, users_table, view_error};
use crate::output::Output;

fn print_page(out: &Output, controller: &UserListController) {
    let list = &controller.state().list;
    if list.items.is_empty() {
        out.dim("No users on this page.");
    } else {
        out.print(users_table(&list.items));
    }
    out.dim(pager_line(list));
    if let Some(err) = &list.last_error {
        out.error(view_error(err));
    }
}

fn print_user(out: &Output, user: &UserProfile, role: Option<&str>) {
    out.header(user.full_name());
    out.divider(40);
    out.labeled("ID", user.id);
    out.labeled("Email", &user.email);
    if let Some(phone) = user.phone_number.as_deref().filter(|p| !p.is_empty()) {
        out.labeled("Phone", phone);
    }
    if let Some(role) = role {
        out.labeled("Role", role);
    }
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        out.labeled("Bio", bio);
    }
    if let Some(picture) = user.profile_picture.as_deref() {
        out.labeled("Picture", picture);
    }
    out.labeled("Created", format_timestamp(user.created_at.as_deref()));
    out.labeled("Updated", format_timestamp(user.updated_at.as_deref()));
}

#[instrument(skip(ctx), name = "users_list")]
pub async fn run_users_list(ctx: &AppContext, page: u32) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Users))?;
    let out = Output::new();

    let mut controller = ctx.users_controller();
    controller.load(page);
    controller.settle().await;

    print_page(&out, &controller);
    match &controller.state().list.last_error {
        Some(err) => Err(anyhow!("Failed to load users: {}", view_error(err))),
        None => Ok(()),
    }
}

#[instrument(skip(ctx), name = "users_view")]
pub async fn run_users_view(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Users))?;
    let out = Output::new();

    let mut controller = ctx.users_controller();
    controller.load_roles();
    controller.view_details(id);
    controller.settle().await;

    let state = controller.state();
    match state.details.user() {
        Some(user) => {
            print_user(&out, user, user.role_id.and_then(|r| state.role_name(r)));
            Ok(())
        }
        None => {
            let reason = state
                .list
                .last_error
                .as_ref()
                .map_or_else(|| "unknown error".to_owned(), view_error);
            Err(anyhow!("Failed to load user {id}: {reason}"))
        }
    }
}

fn load_picture(path: &Path) -> Result<ProfilePicture> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read picture: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Picture path has no file name")?;
    let mime = mime_guess::from_path(path).first().map(|m| m.to_string());

    Ok(ProfilePicture {
        file_name,
        mime,
        bytes,
    })
}

fn prompt_missing(
    value: Option<String>,
    label: &str,
    interactive: bool,
    retained: &str,
) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Text::new(label)
            .with_initial_value(retained)
            .prompt()
            .with_context(|| format!("Failed to read {label}")),
        None => Ok(retained.to_owned()),
    }
}

fn pick_role(roles: &[Role]) -> Result<Option<i64>> {
    if roles.is_empty() {
        return Ok(None);
    }
    let names: Vec<&str> = roles.iter().map(|r| r.role_name.as_str()).collect();
    let picked = Select::new("Role:", names)
        .with_help_message("Esc to skip")
        .prompt_skippable()
        .context("Failed to select role")?;

    Ok(picked.and_then(|name| {
        roles
            .iter()
            .find(|r| r.role_name == name)
            .map(|r| r.role_id)
    }))
}

/// Builds the form from flags, prompting for anything missing unless `--no-input`.
///
/// Fields kept from an earlier failed attempt in `retained` pre-fill the prompts and
/// fill in whatever is neither passed nor prompted.
async fn build_form(
    controller: &mut UserListController,
    args: CreateUserArgs,
    retained: &NewUserForm,
) -> Result<NewUserForm> {
    let interactive = !args.no_input;

    let first_name =
        prompt_missing(args.first_name, "First name:", interactive, &retained.first_name)?;
    let last_name =
        prompt_missing(args.last_name, "Last name:", interactive, &retained.last_name)?;
    let email =
        prompt_missing(args.email, "Email:", interactive, &retained.email)?;
    let password = match args.password {
        Some(password) => password,
        None if interactive && !retained.password.is_empty() => {
            let password = Password::new("Password (Enter to keep):")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt()
                .context("Failed to read password")?;
            if password.is_empty() {
                retained.password.clone()
            } else {
                password
            }
        }
        None if interactive => Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .context("Failed to read password")?,
        None => retained.password.clone(),
    };

    let role_id = match args.role_id {
        Some(id) => Some(id),
        None if interactive => {
            controller.load_roles();
            controller.settle().await;
            pick_role(&controller.state().roles)?.or(retained.role_id)
        }
        None => retained.role_id,
    };

    let profile_picture = match args.picture.as_deref() {
        Some(path) => Some(load_picture(path)?),
        None => retained.profile_picture.clone(),
    };

    Ok(NewUserForm {
        first_name,
        last_name,
        email,
        password,
        bio: args.bio.unwrap_or_else(|| retained.bio.clone()),
        gender: args.gender.unwrap_or_else(|| retained.gender.clone()),
        phone_number: args.phone.unwrap_or_else(|| retained.phone_number.clone()),
        role_id,
        profile_picture,
    })
}

#[instrument(skip_all, name = "users_create")]
pub async fn run_users_create(ctx: &AppContext, args: CreateUserArgs) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Users))?;
    let out = Output::new();

    let mut controller = ctx.users_controller();
    let form = build_form(&mut controller, args, &NewUserForm::default()).await?;
    let email = form.email.clone();

    controller.open_create_form();
    controller.create(form);
    controller.settle().await;

    if let Some(err) = &controller.state().list.last_error {
        bail!("Failed to create user: {}", view_error(err));
    }

    out.success(format!("Created user {email}"));
    out.newline();
    print_page(&out, &controller);
    Ok(())
}

enum BrowseAction {
    Next,
    Prev,
    View,
    Create,
    Reload,
    Quit,
}

impl std::fmt::Display for BrowseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Next => "Next page",
            Self::Prev => "Previous page",
            Self::View => "View a user",
            Self::Create => "Add user",
            Self::Reload => "Reload",
            Self::Quit => "Quit",
        })
    }
}

fn browse_actions(controller: &UserListController) -> Vec<BrowseAction> {
    let mut actions = Vec::new();
    if controller.next_page_enabled() {
        actions.push(BrowseAction::Next);
    }
    if controller.prev_page_enabled() {
        actions.push(BrowseAction::Prev);
    }
    if !controller.state().list.items.is_empty() {
        actions.push(BrowseAction::View);
    }
    actions.extend([BrowseAction::Create, BrowseAction::Reload, BrowseAction::Quit]);
    actions
}

fn pick_user(controller: &UserListController) -> Result<Option<i64>> {
    let options: Vec<String> = controller
        .state()
        .list
        .items
        .iter()
        .map(|u| format!("{} <{}> [{}]", u.full_name(), u.email, u.id))
        .collect();

    let selection = Select::new("Select user:", options)
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt_skippable()
        .context("Failed to select user")?;

    Ok(selection.and_then(|s| {
        let start = s.rfind('[')?;
        s[start + 1..s.len() - 1].parse().ok()
    }))
}

#[instrument(skip_all, name = "users_browse")]
pub async fn run_users_browse(ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Users))?;
    let out = Output::new();

    let mut controller = ctx.users_controller();
    controller.load(1);
    controller.load_roles();
    controller.settle().await;

    loop {
        out.newline();
        print_page(&out, &controller);
        controller.dismiss_error();

        let action = Select::new("Action:", browse_actions(&controller))
            .prompt_skippable()
            .context("Failed to read action")?;
        debug!(action = ?action.as_ref().map(ToString::to_string), "browse");

        match action {
            Some(BrowseAction::Next) => controller.next_page(),
            Some(BrowseAction::Prev) => controller.prev_page(),
            Some(BrowseAction::Reload) => controller.reload(),
            Some(BrowseAction::View) => {
                if let Some(id) = pick_user(&controller)? {
                    controller.view_details(id);
                    controller.settle().await;
                    let state = controller.state();
                    if let Some(user) = state.details.user() {
                        out.newline();
                        print_user(&out, user, user.role_id.and_then(|r| state.role_name(r)));
                    }
                    controller.close_details();
                }
            }
            Some(BrowseAction::Create) => {
                controller.open_create_form();
                let retained = controller.state().create.fields.clone();
                let form =
                    build_form(&mut controller, CreateUserArgs::default(), &retained).await?;
                controller.create(form);
            }
            Some(BrowseAction::Quit) | None => break,
        }
        controller.settle().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphere_business::{BusinessConfig, MemoryStorage, SessionStore};

    fn offline_controller() -> UserListController {
        AppContext::new(
            BusinessConfig::new("http://127.0.0.1:9"),
            SessionStore::new(MemoryStorage::new()),
        )
        .users_controller()
    }

    fn retained() -> NewUserForm {
        NewUserForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "taken@example.com".to_owned(),
            password: "secret".to_owned(),
            bio: "math".to_owned(),
            role_id: Some(2),
            ..NewUserForm::default()
        }
    }

    #[tokio::test]
    async fn retry_keeps_fields_from_failed_attempt() {
        let mut controller = offline_controller();
        let args = CreateUserArgs {
            email: Some("ada@example.com".to_owned()),
            no_input: true,
            ..CreateUserArgs::default()
        };

        let form = build_form(&mut controller, args, &retained())
            .await
            .expect("form should build");

        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.last_name, "Lovelace");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.password, "secret");
        assert_eq!(form.bio, "math");
        assert_eq!(form.role_id, Some(2));
    }

    #[tokio::test]
    async fn fresh_form_without_input_is_empty() {
        let mut controller = offline_controller();
        let args = CreateUserArgs {
            no_input: true,
            ..CreateUserArgs::default()
        };

        let form = build_form(&mut controller, args, &NewUserForm::default())
            .await
            .expect("form should build");

        assert_eq!(form, NewUserForm::default());
    }
}
