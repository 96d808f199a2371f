use anyhow::Result;
use sphere_business::{DashboardTab, Route};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::context::AppContext;
use crate::output::Output;

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Role")]
    name: String,
}

#[instrument(skip_all, name = "roles")]
pub async fn run_roles(ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Users))?;
    let out = Output::new();

    let roles = ctx.services.static_data.list_roles().await?;
    if roles.is_empty() {
        out.dim("No roles defined.");
        return Ok(());
    }

    let rows: Vec<RoleRow> = roles
        .into_iter()
        .map(|role| RoleRow {
            id: role.role_id,
            name: role.role_name,
        })
        .collect();
    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    out.print(table.to_string());
    Ok(())
}
