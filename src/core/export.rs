//! CSV export of the current visible set.
//!
//! The exporter is deliberately stricter than the importer: fields holding
//! a comma or a double quote are quoted with doubled inner quotes so the
//! output re-parses to the same records. An empty visible set is a
//! user-facing notice, not a crash.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::{AppContext, ExportArgs};
use crate::core::model::InventoryRecord;
use crate::core::store::DashboardState;
use crate::infra::config::load_config;
use crate::infra::fetch::Source;

/// Display-casing header row of the exported file.
pub const EXPORT_HEADER: [&str; 8] = [
    "Codigo",
    "Clave",
    "Descripcion",
    "Inv",
    "Clasificacion",
    "Promedio Vta Mes",
    "Cobertura (Mes)",
    "Cobertura Dias (30)",
];

/// Default export filename.
pub const DEFAULT_EXPORT_FILE: &str = "inventario_filtrado.csv";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExportError {
    /// Every filter removed every row; there is nothing to write.
    #[error("nothing to export: the current filters leave no visible rows")]
    Empty,
}

/// Serialize `visible` to CSV text in its current order.
pub fn export_csv(visible: &[InventoryRecord]) -> Result<String, ExportError> {
    if visible.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut out = String::with_capacity(visible.len() * 64);
    out.push_str(&EXPORT_HEADER.join(","));
    out.push('\n');

    for rec in visible {
        let row = [
            csv_field(&rec.code),
            csv_field(&rec.key),
            csv_field(&rec.description),
            Cow::Owned(fmt_number(rec.inventory_qty)),
            csv_field(&rec.classification),
            Cow::Owned(fmt_number(rec.avg_monthly_sales)),
            Cow::Owned(fmt_number(rec.coverage_months)),
            Cow::Owned(fmt_number(rec.coverage_days30)),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// Quote a field when it contains a comma or a quote, doubling inner
/// quotes (RFC 4180).
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Minimal decimal rendering: whole numbers print without a trailing
/// fraction so the file re-parses to the same f64.
fn fmt_number(value: f64) -> String {
    format!("{value}")
}

/// `stk export`: load, filter, sort, then write the visible set.
pub fn run(args: ExportArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let source = Source::resolve(args.source.path.clone(), args.source.url.clone(), &config)?;

    let mut state = DashboardState::new(args.query.filter_state(None), args.query.sort_state());
    let ticket = state.begin_load(&source.label());
    let text = source.load(ctx)?;
    state.complete_load(ticket, crate::core::parse::parse(&text));

    let snapshot = state.recompute();
    let csv = match export_csv(&snapshot.visible) {
        Ok(csv) => csv,
        Err(ExportError::Empty) => {
            if !ctx.quiet {
                eprintln!("{}", ExportError::Empty.to_string().yellow());
            }
            return Ok(());
        }
    };

    if ctx.dry_run {
        if !ctx.quiet {
            println!("DRY RUN: would export {} rows", snapshot.visible.len());
        }
        return Ok(());
    }

    if args.clipboard {
        let mut clipboard = arboard::Clipboard::new().context("open clipboard")?;
        clipboard
            .set_text(csv)
            .context("copy export to clipboard")?;
        if !ctx.quiet {
            println!("Copied {} rows to clipboard", snapshot.visible.len());
        }
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| config.export.output_file.clone().into());
    write_atomic(&output, &csv)?;
    info!(rows = snapshot.visible.len(), path = %output.display(), "exported visible set");

    if !ctx.quiet {
        println!(
            "Exported {} rows to {}",
            snapshot.visible.len().to_string().green(),
            output.display()
        );
    }
    Ok(())
}

/// Write through a temp file in the target directory, then rename.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new_in("."),
    }
    .context("create temp file for export")?;

    tmp.write_all(contents.as_bytes())
        .context("write export contents")?;
    tmp.persist(path)
        .with_context(|| format!("persist export to {}", path.display()))?;
    Ok(())
}
