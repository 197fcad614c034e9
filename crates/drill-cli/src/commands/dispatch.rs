use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Study(_) => commands::study::handle(ctx, flags).await,
        Commands::Sync(_) => commands::sync::handle(ctx, flags),
        Commands::Queue(_) => commands::queue::handle(ctx, flags),
        Commands::Stats(_) => commands::stats::handle(ctx, flags),
        Commands::Uncertain(_) => commands::uncertain::handle(ctx, flags),
        Commands::Schema => unreachable!("schema is pre-dispatched in main"),
    }
}
