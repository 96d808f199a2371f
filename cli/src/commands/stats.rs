use anyhow::{Result, anyhow};
use sphere_business::{DashboardTab, Route};
use tracing::instrument;

use crate::context::AppContext;
use crate::format::stats_table;
use crate::output::Output;

#[instrument(skip_all, name = "stats")]
pub async fn run_stats(ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard(DashboardTab::Overview))?;
    let out = Output::new();

    let mut stats = ctx.stats_controller();
    stats.refresh();
    stats.settle().await;

    out.header("Dashboard Overview");
    out.print(stats_table(&stats.stat_cards()));

    match stats.error() {
        Some(err) => Err(anyhow!("Failed to load statistics: {}", err.message)),
        None => Ok(()),
    }
}
