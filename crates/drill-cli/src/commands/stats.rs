use drill_core::responses::PointStats;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `drill stats`. Lists every point, hidden ones included, in file order.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.persist_registrations()?;
    let rows: Vec<PointStats> = ctx.items.iter().map(PointStats::from).collect();
    output(&rows, flags.format)
}
