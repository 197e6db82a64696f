//! Typed inventory rows shared by every engine.
//!
//! A record always carries all seven source fields: a column missing from
//! the CSV degrades to an empty string or 0, never to an absent field.
//! Numeric fields are never NaN.

use serde::{Deserialize, Serialize};

/// Bucket label used for rows whose classification cell is empty.
pub const UNCLASSIFIED: &str = "unclassified";

/// One product row from the inventory CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Product identifier (arbitrary text, not guaranteed unique)
    pub code: String,
    /// Secondary identifier / alias
    pub key: String,
    /// Free-text description
    pub description: String,
    /// Units on hand
    pub inventory_qty: f64,
    /// Categorical priority label (ABC tier); empty = unclassified
    pub classification: String,
    /// Average monthly sales
    pub avg_monthly_sales: f64,
    /// Estimated months of stock at the current sales rate
    pub coverage_months: f64,
    /// Estimated days of stock over a 30-day sales window
    pub coverage_days30: f64,
    /// Lowercase code+key+description, computed once at parse time
    pub search_index: String,
}

impl InventoryRecord {
    /// Build a record, deriving `search_index` from the three text fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: String,
        key: String,
        description: String,
        inventory_qty: f64,
        classification: String,
        avg_monthly_sales: f64,
        coverage_months: f64,
        coverage_days30: f64,
    ) -> Self {
        let search_index = format!("{code} {key} {description}").to_lowercase();
        Self {
            code,
            key,
            description,
            inventory_qty,
            classification,
            avg_monthly_sales,
            coverage_months,
            coverage_days30,
            search_index,
        }
    }

    /// Classification label with the empty cell folded into the
    /// `unclassified` bucket.
    pub fn classification_label(&self) -> &str {
        if self.classification.trim().is_empty() {
            UNCLASSIFIED
        } else {
            &self.classification
        }
    }
}
