use std::io::IsTerminal;

use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod prompt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("drill error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if matches!(cli.command, cli::Commands::Schema) {
        return commands::schema::handle(&flags);
    }

    let config = bootstrap::load_config(cli.command.source_args())?;
    let mut ctx = context::AppContext::init(config)?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DRILL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
