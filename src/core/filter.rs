//! Pure filter engine: (all records, criteria) -> visible records.
//!
//! Predicates combine as a logical AND; a predicate left at its neutral
//! value is skipped from the chain entirely. Relative order of the input
//! is always preserved.

use clap::ValueEnum;
use indexmap::IndexSet;
use serde::Serialize;

use crate::core::model::InventoryRecord;

/// Days-of-coverage threshold below which a row counts as critical.
pub const CRITICAL_DAYS: f64 = 30.0;
/// Months-of-coverage threshold above which a row counts as overstock.
pub const OVERSTOCK_MONTHS: f64 = 3.0;

/// Coverage bucket over `coverage_months`. The three non-`All` buckets are
/// a total, non-overlapping partition of the non-negative axis:
/// critical = [0, 1], medium = (1, 3], high = (3, inf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum CoverageBucket {
    /// No restriction
    #[default]
    All,
    /// At most one month of stock
    #[value(alias = "critico")]
    Critical,
    /// More than one and up to three months
    #[value(alias = "medio")]
    Medium,
    /// More than three months
    #[value(alias = "alto")]
    High,
}

impl CoverageBucket {
    /// Whether `months` falls in this bucket. `All` admits everything.
    pub fn contains(self, months: f64) -> bool {
        match self {
            Self::All => true,
            Self::Critical => months <= 1.0,
            Self::Medium => months > 1.0 && months <= OVERSTOCK_MONTHS,
            Self::High => months > OVERSTOCK_MONTHS,
        }
    }
}

/// Active filter criteria for one recompute.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Case-insensitive substring matched against code, key, or description
    pub search: String,
    /// OR-membership over classification labels; empty = no restriction.
    /// The empty classification participates as `unclassified`.
    pub classes: IndexSet<String>,
    /// Coverage-months bucket selector
    pub coverage: CoverageBucket,
    /// Keep only rows with `coverage_days30 <= 30`
    pub critical_days_only: bool,
    /// Keep only rows with zero average monthly sales
    pub no_movement_only: bool,
    /// Presentation-only row cap; never affects the computed visible set
    pub row_cap: Option<usize>,
}

/// Apply the AND chain over `all`, returning a fresh visible set in the
/// same relative order.
pub fn filter(all: &[InventoryRecord], state: &FilterState) -> Vec<InventoryRecord> {
    let needle = state.search.trim().to_lowercase();

    all.iter()
        .filter(|rec| needle.is_empty() || rec.search_index.contains(&needle))
        .filter(|rec| {
            state.classes.is_empty() || state.classes.contains(rec.classification_label())
        })
        .filter(|rec| state.coverage.contains(rec.coverage_months))
        .filter(|rec| !state.critical_days_only || rec.coverage_days30 <= CRITICAL_DAYS)
        .filter(|rec| !state.no_movement_only || rec.avg_monthly_sales == 0.0)
        .cloned()
        .collect()
}
