use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::filter::{CoverageBucket, FilterState};
use crate::core::sort::{Direction, SortKey, SortState};

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "stocklens")]
#[command(about = "A fast CLI for inventory coverage analytics over CSV exports")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress spinners and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a CSV and print KPIs plus the filtered record table
    Report(ReportArgs),

    /// Write the filtered record set back to CSV
    Export(ExportArgs),

    /// Re-run the report whenever the source file changes
    Watch(WatchArgs),

    /// Initialize a stocklens.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where to read the CSV from; falls back to the config file.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local CSV file to load
    pub path: Option<PathBuf>,

    /// Fetch the CSV from this URL instead of a local file
    #[arg(long, conflicts_with = "path")]
    pub url: Option<String>,
}

/// Filter and sort criteria shared by report, export, and watch.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Case-insensitive substring over code, key, and description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keep only these classifications (repeatable; use "unclassified"
    /// for rows without a label)
    #[arg(short = 'c', long = "class", value_name = "LABEL")]
    pub classes: Vec<String>,

    /// Coverage-months bucket
    #[arg(long, value_enum, default_value_t = CoverageBucket::All)]
    pub coverage: CoverageBucket,

    /// Keep only rows at or under 30 days of coverage
    #[arg(long)]
    pub critical_days: bool,

    /// Keep only rows with zero average monthly sales
    #[arg(long)]
    pub no_movement: bool,

    /// Sort column
    #[arg(long, value_enum)]
    pub sort_by: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort_by")]
    pub desc: bool,
}

impl QueryArgs {
    /// Build the engine-facing filter state. `row_cap` is presentation
    /// only and comes from the caller (config or --all-rows).
    pub fn filter_state(&self, row_cap: Option<usize>) -> FilterState {
        FilterState {
            search: self.search.clone().unwrap_or_default(),
            classes: self.classes.iter().cloned().collect(),
            coverage: self.coverage,
            critical_days_only: self.critical_days,
            no_movement_only: self.no_movement,
            row_cap,
        }
    }

    pub fn sort_state(&self) -> SortState {
        SortState {
            key: self.sort_by,
            direction: if self.desc {
                Direction::Descending
            } else {
                Direction::Ascending
            },
        }
    }
}

#[derive(Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Render every row instead of capping the table
    #[arg(long)]
    pub all_rows: bool,

    /// Emit the snapshot (visible records + KPIs) as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Copy the CSV to the clipboard instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub clipboard: bool,
}

#[derive(Parser)]
pub struct WatchArgs {
    /// Local CSV file to watch
    pub path: PathBuf,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Render every row instead of capping the table
    #[arg(long)]
    pub all_rows: bool,

    /// Quiet period in milliseconds between file events and recompute
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
