use drill_core::responses::PointStats;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `drill queue`.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.persist_registrations()?;
    let rows: Vec<PointStats> = ctx.queue()?.iter().map(PointStats::from).collect();
    output(&rows, flags.format)
}
