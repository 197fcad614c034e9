//! `drill study`: the interactive session and its teardown.
//!
//! The prompt loop blocks on stdin, so it runs on the blocking pool while the
//! handler waits on either its completion or Ctrl-C. Both paths end in the
//! same teardown: one commit of whatever outcomes were recorded.

use std::io::BufRead;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use drill_config::MediaConfig;
use drill_core::entities::StudyItem;
use drill_core::responses::SessionSummary;
use drill_core::session::SessionState;
use tokio::task::JoinHandle;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt;

/// Exit status after an interrupted session, as for SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Handle `drill study`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let queue = ctx.queue()?;
    if queue.is_empty() {
        ctx.persist_registrations()?;
        if !flags.quiet {
            eprintln!("nothing to study: every point is hidden or above the threshold");
        }
        return output(&SessionSummary::default(), flags.format);
    }
    if !flags.quiet {
        eprintln!("{} of {} points scheduled", queue.len(), ctx.items.len());
    }

    let state = Arc::new(Mutex::new(SessionState::new(&queue)));
    let mut session = spawn_prompt_loop(
        queue,
        ctx.config.media.clone(),
        Arc::clone(&state),
        std::io::BufReader::new(std::io::stdin()),
    );

    let (interrupted, loop_result) = tokio::select! {
        joined = &mut session => {
            let result = joined.context("study loop panicked")?;
            (false, result)
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            tracing::warn!("interrupted; saving recorded outcomes");
            (true, Ok(()))
        }
    };

    let (updates, summary) = {
        let state = state
            .lock()
            .map_err(|_| anyhow::anyhow!("session state lock poisoned"))?;
        (state.updates(), state.summary())
    };
    tracing::debug!(seen = updates.len(), "session finished");

    ctx.commit_session(&updates)?;
    println!();
    output(&summary, flags.format)?;

    if interrupted {
        // The prompt thread is still blocked on stdin and would hold the
        // runtime open.
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
    loop_result
}

/// Run the prompt loop on the blocking pool.
///
/// Output goes through an unlocked `Stdout`, which locks per write. Holding
/// the lock across the whole loop would block the teardown's own output while
/// the loop waits on `input`.
fn spawn_prompt_loop<R>(
    queue: Vec<StudyItem>,
    media: MediaConfig,
    state: Arc<Mutex<SessionState>>,
    mut input: R,
) -> JoinHandle<anyhow::Result<()>>
where
    R: BufRead + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut output = std::io::stdout();
        prompt::run_session(&queue, &media, &state, &mut input, &mut output)
    })
}
