//! Owned dashboard state: the full record set plus filter/sort criteria.
//!
//! There is exactly one state object per session, owned by the command
//! runner and passed into the pure engines; nothing lives in globals. The
//! record set is only ever replaced wholesale through the load-ticket
//! protocol, which rejects stale completions when loads overlap.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use crate::core::filter::{self, FilterState};
use crate::core::kpi::{self, KpiSummary};
use crate::core::model::InventoryRecord;
use crate::core::sort::{self, SortKey, SortState};

/// Proof that a load was begun; required to complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One recompute of the pipeline: the visible set and its KPIs, rebuilt
/// from scratch and discarded on the next state change.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub visible: Vec<InventoryRecord>,
    pub kpis: KpiSummary,
}

/// Application state for one session.
#[derive(Debug, Default)]
pub struct DashboardState {
    records: Vec<InventoryRecord>,
    pub filter: FilterState,
    pub sort: SortState,
    source: Option<String>,
    loaded_at: Option<DateTime<Local>>,
    load_seq: u64,
}

impl DashboardState {
    pub fn new(filter: FilterState, sort: SortState) -> Self {
        Self {
            filter,
            sort,
            ..Default::default()
        }
    }

    /// Start a load from `source`. The returned ticket must be presented
    /// to [`Self::complete_load`]; beginning another load invalidates it.
    pub fn begin_load(&mut self, source: &str) -> LoadTicket {
        self.load_seq += 1;
        self.source = Some(source.to_string());
        LoadTicket(self.load_seq)
    }

    /// Atomically replace the record set, unless a newer load has begun
    /// since `ticket` was issued. Returns whether the load was accepted;
    /// a rejected load leaves the prior data untouched.
    pub fn complete_load(&mut self, ticket: LoadTicket, records: Vec<InventoryRecord>) -> bool {
        if ticket.0 != self.load_seq {
            debug!(ticket = ticket.0, current = self.load_seq, "stale load rejected");
            return false;
        }
        self.records = records;
        self.loaded_at = Some(Local::now());
        true
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    /// Column-click entry point; delegates to [`SortState::toggle`].
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    /// Run the full pipeline: filter, then sort the filtered set, then
    /// aggregate. Always recomputes from the complete record set.
    pub fn recompute(&self) -> Snapshot {
        let mut visible = filter::filter(&self.records, &self.filter);
        if let Some(key) = self.sort.key {
            visible = sort::sort(visible, key, self.sort.direction);
        }
        let kpis = kpi::aggregate(&visible, self.records.len());
        Snapshot { visible, kpis }
    }
}
