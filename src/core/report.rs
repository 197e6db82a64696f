//! The `report` command: load a CSV source, run the pipeline once, render.

use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::{AppContext, ReportArgs};
use crate::core::parse;
use crate::core::store::DashboardState;
use crate::infra::config::load_config;
use crate::infra::fetch::Source;
use crate::presenter;

pub fn run(args: ReportArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let source = Source::resolve(args.source.path.clone(), args.source.url.clone(), &config)?;

    let row_cap = (!args.all_rows).then_some(config.table.row_cap);
    let mut state = DashboardState::new(args.query.filter_state(row_cap), args.query.sort_state());

    if ctx.dry_run {
        if !ctx.quiet {
            println!("DRY RUN: would load {}", source.label());
        }
        return Ok(());
    }

    let ticket = state.begin_load(&source.label());
    let text = match source.load(ctx) {
        Ok(text) => text,
        Err(err) => {
            // Transport failures are recoverable: report and leave the
            // (empty) record set as it was.
            eprintln!("{} {err}", "load failed:".red());
            return Ok(());
        }
    };
    state.complete_load(ticket, parse::parse(&text));
    info!(records = state.total_count(), source = %source.label(), "loaded record set");

    let snapshot = state.recompute();
    if args.json {
        presenter::render_json(&snapshot)?;
    } else {
        presenter::render(&snapshot, &state, ctx);
    }
    Ok(())
}
