//! **stocklens** - Fast CLI for inventory coverage analytics over CSV exports
//!
//! Loads a product-inventory CSV (local file or HTTP), then filters, sorts,
//! aggregates, and exports the visible subset. The pipeline is a pure
//! recompute-from-scratch on every invocation; no incremental state.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - parsing, filtering, sorting, aggregation, export
pub mod core {
    /// Typed inventory rows
    pub mod model;
    pub use model::{InventoryRecord, UNCLASSIFIED};

    /// Lenient CSV parsing with delimiter auto-detection
    pub mod parse;
    pub use parse::{Quoting, parse, parse_with};

    /// Pure AND-chain filter engine
    pub mod filter;
    pub use filter::{CoverageBucket, FilterState, filter};

    /// Column sort engine with click-toggle semantics
    pub mod sort;
    pub use sort::{Direction, SortKey, SortState, sort};

    /// KPI aggregation over the visible set
    pub mod kpi;
    pub use kpi::{KpiSummary, aggregate};

    /// Round-trippable CSV export of the visible set
    pub mod export;
    pub use export::{ExportError, export_csv, run as export_run};

    /// Session state: record store + filter/sort criteria
    pub mod store;
    pub use store::{DashboardState, Snapshot};

    /// One-shot report command
    pub mod report;
    pub use report::run as report_run;

    /// Live recompute loop over a watched file
    pub mod watch;
    pub use watch::run as watch_run;
}

/// Infrastructure - configuration, transports, timing
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// HTTP and file source transports
    pub mod fetch;
    pub use fetch::{Source, TransportError, fetch_url};

    /// Memory-mapped file reading for large CSVs (>1MB threshold)
    pub mod io;
    pub use io::read_source;

    /// Single pending-timer debounce for watch mode
    pub mod debounce;
    pub use debounce::Debouncer;
}

/// Terminal rendering of KPI cards and the record table
pub mod presenter;

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{export_run, report_run, watch_run};
pub use infra::{Config, Debouncer, load_config};

// Core types for external consumers
pub use core::{
    CoverageBucket, DashboardState, FilterState, InventoryRecord, KpiSummary, Snapshot, SortKey,
    SortState,
};
