use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `drill sync`.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.persist_registrations()?;
    if !ctx.sync.assigned.is_empty() {
        tracing::info!(
            assigned = ctx.sync.assigned.len(),
            files = ctx.sync.rewritten_files.len(),
            "assigned identifiers to new questions"
        );
    }
    output(&ctx.sync, flags.format)
}
