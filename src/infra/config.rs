use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::export::DEFAULT_EXPORT_FILE;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config
{
    /// Default CSV source
    pub source: SourceConfig,

    /// Table rendering settings
    pub table: TableConfig,

    /// Watch mode settings
    pub watch: WatchConfig,

    /// Export settings
    pub export: ExportConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceConfig
{
    /// CSV source URL (takes precedence over `path`)
    pub url: Option<String>,
    /// Local CSV file path
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableConfig
{
    /// Rows rendered before the table is truncated (`--all-rows` lifts it)
    pub row_cap: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WatchConfig
{
    /// Quiet period between the last file event and the recompute
    pub debounce_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig
{
    pub output_file: String,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            source: SourceConfig { url: None, path: None },
            table: TableConfig { row_cap: 500 },
            watch: WatchConfig { debounce_ms: 250 },
            export: ExportConfig { output_file: DEFAULT_EXPORT_FILE.to_string() },
        }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["stocklens.toml", "stocklens.yaml", "stocklens.json", ".stocklens.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with STOCKLENS_ prefix
    builder = builder.add_source(config::Environment::with_prefix("STOCKLENS").separator("_"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("stocklens.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
