use anyhow::Result;
use clap::Parser;
use stocklens::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Honors RUST_LOG; silent by default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Report(args) => stocklens::report_run(args, &ctx),
        Commands::Export(args) => stocklens::export_run(args, &ctx),
        Commands::Watch(args) => stocklens::watch_run(args, &ctx),
        Commands::Init(args) => stocklens::infra::config::init(args, &ctx),
        Commands::Completions(args) => stocklens::completion::run(args),
    }
}
