//! KPI aggregation over the visible record set.
//!
//! Pure and recomputed in full on every call. Internal sums keep full f64
//! precision; rounding is the presenter's job.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::filter::{CRITICAL_DAYS, OVERSTOCK_MONTHS};
use crate::core::model::InventoryRecord;

/// Per-classification slice of the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassBucket {
    pub count: usize,
    pub total_inventory: f64,
}

/// Summary metrics for one recompute of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub visible_count: usize,
    pub total_count: usize,
    /// Sum of `inventory_qty` over the visible set
    pub total_inventory: f64,
    /// Sum of `avg_monthly_sales` over the visible set
    pub total_avg_sales: f64,
    /// Mean of `coverage_days30`; 0 when the visible set is empty
    pub avg_coverage_days: f64,
    /// Rows with `coverage_days30 <= 30`
    pub critical_count30: usize,
    /// Rows with `coverage_months > 3`
    pub overstock_count: usize,
    /// Share of visible inventory sitting in critical rows, in percent;
    /// 0 when the visible set holds no inventory
    pub pct_inventory_critical: f64,
    /// Classification breakdown in first-seen order; empty label folds
    /// into `unclassified`
    pub classification: IndexMap<String, ClassBucket>,
}

/// Compute the full KPI summary for `visible`. `total_count` is the size
/// of the unfiltered record set and only feeds the counts pair.
pub fn aggregate(visible: &[InventoryRecord], total_count: usize) -> KpiSummary {
    let mut total_inventory = 0.0;
    let mut total_avg_sales = 0.0;
    let mut days_sum = 0.0;
    let mut critical_count30 = 0;
    let mut overstock_count = 0;
    let mut critical_inventory = 0.0;
    let mut classification: IndexMap<String, ClassBucket> = IndexMap::new();

    for rec in visible {
        total_inventory += rec.inventory_qty;
        total_avg_sales += rec.avg_monthly_sales;
        days_sum += rec.coverage_days30;

        if rec.coverage_days30 <= CRITICAL_DAYS {
            critical_count30 += 1;
            critical_inventory += rec.inventory_qty;
        }
        if rec.coverage_months > OVERSTOCK_MONTHS {
            overstock_count += 1;
        }

        let bucket = classification
            .entry(rec.classification_label().to_string())
            .or_insert(ClassBucket {
                count: 0,
                total_inventory: 0.0,
            });
        bucket.count += 1;
        bucket.total_inventory += rec.inventory_qty;
    }

    let avg_coverage_days = if visible.is_empty() {
        0.0
    } else {
        days_sum / visible.len() as f64
    };
    let pct_inventory_critical = if total_inventory == 0.0 {
        0.0
    } else {
        critical_inventory / total_inventory * 100.0
    };

    KpiSummary {
        visible_count: visible.len(),
        total_count,
        total_inventory,
        total_avg_sales,
        avg_coverage_days,
        critical_count30,
        overstock_count,
        pct_inventory_critical,
        classification,
    }
}
