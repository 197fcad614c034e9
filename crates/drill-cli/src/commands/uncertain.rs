use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `drill uncertain`.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.persist_registrations()?;
    output(&ctx.uncertainties, flags.format)
}
