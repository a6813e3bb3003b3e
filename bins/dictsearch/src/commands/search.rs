//! Search command

use crate::context::AppContext;
use anyhow::{bail, Result};
use dictsearch_cli::output::{render_element, render_state, to_json};
use dictsearch_cli::{OutputFormat, SearchProgress, Status};
use dictsearch_engine::SearchState;

/// Run one search and print its terminal state
pub async fn run(config_path: Option<&str>, query: &str, pick: Option<usize>, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let engine = ctx.engine.clone();

    let mut updates = engine.subscribe();
    let mut progress = match format {
        OutputFormat::Text => SearchProgress::start(query.trim()),
        OutputFormat::Json => SearchProgress::hidden(),
    };
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            progress.update(&state);
            if state.is_terminal() {
                break;
            }
        }
        progress
    });

    let outcome = engine.search(query).await;
    ctx.save_history();

    let progress = watcher.await?;
    progress.clear();

    let mut state = outcome?;
    if let Some(n) = pick {
        state = pick_result(&ctx, state, n).await?;
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&state)?),
        OutputFormat::Text => print_state(&state),
    }

    match state {
        SearchState::Failed { reason } => bail!(reason),
        _ => Ok(()),
    }
}

async fn pick_result(ctx: &AppContext, state: SearchState, n: usize) -> Result<SearchState> {
    let SearchState::PartialResult { records } = &state else {
        // Single results are already shown in full
        return Ok(state);
    };

    let Some(record) = n.checked_sub(1).and_then(|i| records.get(i)) else {
        bail!("--pick {n} is out of range: {} results", records.len());
    };
    Ok(ctx.engine.select_result(record).await?)
}

fn print_state(state: &SearchState) {
    match state {
        SearchState::ExactHit { element } => print!("{}", render_element(element)),
        SearchState::NoMatch { message, .. } => Status::info(message),
        // Reported as the command error
        SearchState::Failed { .. } => {}
        other => print!("{}", render_state(other)),
    }
}
