//! Terminal presentation of a pipeline snapshot.
//!
//! This layer only consumes engine outputs: it never filters, sorts, or
//! aggregates on its own, and all numeric rounding happens here.

use anyhow::Result;
use itertools::Itertools;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

use crate::cli::AppContext;
use crate::core::filter::CRITICAL_DAYS;
use crate::core::model::InventoryRecord;
use crate::core::store::{DashboardState, Snapshot};

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "Codigo")]
    code: String,
    #[tabled(rename = "Clave")]
    key: String,
    #[tabled(rename = "Descripcion")]
    description: String,
    #[tabled(rename = "Inv")]
    inventory: String,
    #[tabled(rename = "Clasif")]
    classification: String,
    #[tabled(rename = "Prom Vta Mes")]
    avg_sales: String,
    #[tabled(rename = "Cob (Mes)")]
    coverage_months: String,
    #[tabled(rename = "Cob Dias (30)")]
    coverage_days: String,
}

impl DisplayRow {
    fn from_record(rec: &InventoryRecord) -> Self {
        Self {
            code: rec.code.clone(),
            key: rec.key.clone(),
            description: truncate(&rec.description, 48),
            inventory: group_thousands(rec.inventory_qty),
            classification: rec.classification_label().to_string(),
            avg_sales: format!("{:.1}", rec.avg_monthly_sales),
            coverage_months: format!("{:.1}", rec.coverage_months),
            coverage_days: format!("{:.0}", rec.coverage_days30),
        }
    }
}

/// Print the snapshot as JSON (visible records plus KPIs).
pub fn render_json(snapshot: &Snapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

/// Print KPI cards, the classification summary, and the record table.
pub fn render(snapshot: &Snapshot, state: &DashboardState, ctx: &AppContext) {
    let kpis = &snapshot.kpis;
    let paint = |text: String, critical: bool| {
        if ctx.no_color {
            text
        } else if critical {
            text.red().to_string()
        } else {
            text.bold().to_string()
        }
    };

    if let Some(source) = state.source() {
        let stamp = state
            .loaded_at()
            .map(|at| at.format(" at %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("Inventory report for {source}{stamp}");
    }
    println!();

    println!(
        "  Visible rows        {} / {}",
        paint(kpis.visible_count.to_string(), false),
        kpis.total_count
    );
    println!(
        "  Total inventory     {}",
        paint(group_thousands(kpis.total_inventory), false)
    );
    println!(
        "  Avg monthly sales   {}",
        paint(format!("{:.1}", kpis.total_avg_sales), false)
    );
    println!(
        "  Avg coverage (days) {}",
        paint(format!("{:.1}", kpis.avg_coverage_days), false)
    );
    println!(
        "  Critical (<= {CRITICAL_DAYS:.0}d)   {} rows, {} of inventory",
        paint(kpis.critical_count30.to_string(), kpis.critical_count30 > 0),
        paint(format!("{:.1}%", kpis.pct_inventory_critical), false)
    );
    println!(
        "  Overstock (> 3m)    {} rows",
        paint(kpis.overstock_count.to_string(), false)
    );

    if !kpis.classification.is_empty() {
        let badges = kpis
            .classification
            .iter()
            .map(|(label, bucket)| {
                format!(
                    "{} {} ({} u)",
                    label,
                    bucket.count,
                    group_thousands(bucket.total_inventory)
                )
            })
            .join("  |  ");
        println!("\n  Classification: {badges}");
    }

    println!();
    render_table(&snapshot.visible, state.filter.row_cap);

    if let Some(key) = state.sort.key {
        println!("\nSorted by {:?} ({:?})", key, state.sort.direction);
    }
}

fn render_table(visible: &[InventoryRecord], row_cap: Option<usize>) {
    if visible.is_empty() {
        println!("No rows match the active filters.");
        return;
    }

    let shown = match row_cap {
        Some(cap) => visible.len().min(cap),
        None => visible.len(),
    };
    let rows: Vec<DisplayRow> = visible[..shown].iter().map(DisplayRow::from_record).collect();
    println!("{}", Table::new(rows));

    if shown < visible.len() {
        println!(
            "... {} more rows not shown (use --all-rows)",
            visible.len() - shown
        );
    }
}

/// Integer rendering with thousands separators, e.g. 1234567 -> 1,234,567.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-4200.0), "-4,200");
    }

    #[test]
    fn truncate_keeps_short_text_and_marks_long_text() {
        assert_eq!(truncate("Widget", 48), "Widget");
        let long = "x".repeat(60);
        let cut = truncate(&long, 48);
        assert_eq!(cut.chars().count(), 48);
        assert!(cut.ends_with('\u{2026}'));
    }
}
