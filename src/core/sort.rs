//! Column sort engine for the visible record set.
//!
//! Sorting always runs on the already-filtered set and returns a reordered
//! copy. The sort is unstable: ties keep an implementation-defined relative
//! order, matching the column-header contract rather than promising
//! stability.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Serialize;

use crate::core::model::InventoryRecord;

/// Sortable columns. Numeric columns compare with `f64::total_cmp`; text
/// columns compare case-insensitively with byte order breaking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum SortKey {
    Code,
    Key,
    Description,
    Inventory,
    Classification,
    AvgSales,
    CoverageMonths,
    CoverageDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction, driven by repeated column clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: Direction,
}

impl SortState {
    /// Column-click semantics: re-selecting the active key flips the
    /// direction, selecting a new key resets to ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flip();
        } else {
            self.key = Some(key);
            self.direction = Direction::Ascending;
        }
    }
}

/// Return a reordered copy of `records` by `key` in `direction`.
pub fn sort(
    mut records: Vec<InventoryRecord>,
    key: SortKey,
    direction: Direction,
) -> Vec<InventoryRecord> {
    records.sort_unstable_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    records
}

fn compare(a: &InventoryRecord, b: &InventoryRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Code => text_cmp(&a.code, &b.code),
        SortKey::Key => text_cmp(&a.key, &b.key),
        SortKey::Description => text_cmp(&a.description, &b.description),
        SortKey::Classification => text_cmp(&a.classification, &b.classification),
        SortKey::Inventory => a.inventory_qty.total_cmp(&b.inventory_qty),
        SortKey::AvgSales => a.avg_monthly_sales.total_cmp(&b.avg_monthly_sales),
        SortKey::CoverageMonths => a.coverage_months.total_cmp(&b.coverage_months),
        SortKey::CoverageDays => a.coverage_days30.total_cmp(&b.coverage_days30),
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
