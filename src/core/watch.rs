//! The `watch` command: live recompute loop over a local CSV file.
//!
//! File-change notifications feed a debouncer so that editors and sync
//! tools that rewrite the file in bursts trigger one reload, not many.
//! A failed reload keeps the previous record set on screen.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use crate::cli::{AppContext, WatchArgs};
use crate::core::parse;
use crate::core::store::DashboardState;
use crate::infra::config::load_config;
use crate::infra::debounce::Debouncer;
use crate::infra::fetch::Source;
use crate::infra::io::read_source;
use crate::presenter;

/// Poll granularity when no debounce deadline is pending.
const IDLE_TICK: Duration = Duration::from_millis(500);

pub fn run(args: WatchArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let source = Source::resolve(Some(args.path.clone()), None, &config)?;
    let path = match &source {
        Source::File(path) => path.clone(),
        Source::Url(_) => unreachable!("watch always resolves a file path"),
    };

    let row_cap = (!args.all_rows).then_some(config.table.row_cap);
    let mut state = DashboardState::new(args.query.filter_state(row_cap), args.query.sort_state());

    // Initial load must succeed; later reload failures are recoverable
    let ticket = state.begin_load(&source.label());
    let text = read_source(&path)?;
    state.complete_load(ticket, parse::parse(&text));
    presenter::render(&state.recompute(), &state, ctx);

    if ctx.dry_run {
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(move |event| {
        tx.send(event).ok();
    })
    .context("create file watcher")?;
    watcher
        .watch(&path, RecursiveMode::NonRecursive)
        .with_context(|| format!("watch {}", path.display()))?;

    if !ctx.quiet {
        println!(
            "\nWatching {} (Ctrl-C to stop)",
            path.display().to_string().cyan()
        );
    }

    let quiet_period = Duration::from_millis(args.debounce_ms.unwrap_or(config.watch.debounce_ms));
    let mut debouncer = Debouncer::new(quiet_period);

    loop {
        let timeout = debouncer.time_left(Instant::now()).unwrap_or(IDLE_TICK);
        match rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                if is_content_change(&event.kind) {
                    debug!(kind = ?event.kind, "source file changed");
                    debouncer.poke(Instant::now());
                }
            }
            Ok(Err(err)) => warn!(%err, "watcher error"),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.fire_due(Instant::now()) {
            reload(&mut state, &source, &path, ctx);
        }
    }
    Ok(())
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_))
}

fn reload(state: &mut DashboardState, source: &Source, path: &std::path::Path, ctx: &AppContext) {
    let ticket = state.begin_load(&source.label());
    match read_source(path) {
        Ok(text) => {
            state.complete_load(ticket, parse::parse(&text));
            presenter::render(&state.recompute(), state, ctx);
        }
        Err(err) => {
            // Keep the previous data set; the next change may recover
            eprintln!("{} {err:#}", "reload failed:".red());
        }
    }
}
