use anyhow::Result;
use sphere_business::GateDecision;
use tracing::instrument;

use crate::context::AppContext;
use crate::format::gate_decision;
use crate::output::Output;

/// Prints what the panel would render for `path`.
#[instrument(skip(ctx), name = "open")]
pub fn run_open(ctx: &AppContext, path: &str) -> Result<()> {
    let out = Output::new();
    let decision = ctx.gate.navigate(path);

    match decision {
        GateDecision::Allowed(_) => out.success(gate_decision(decision)),
        GateDecision::Redirected { .. } => out.warning(gate_decision(decision)),
    }
    Ok(())
}
