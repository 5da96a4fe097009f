//! locale-merge CLI - lmerge command

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod diff_utils;
mod settings;
mod util;

use settings::Settings;

/// locale-merge - Merge i18n JSON fragments into per-language files
#[derive(Parser)]
#[command(name = "lmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: lmerge.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one merge pass and write the output files
    Run {
        #[command(flatten)]
        overrides: MergeArgs,
    },
    /// Merge once, then again on every change under the source root
    Watch {
        #[command(flatten)]
        overrides: MergeArgs,
    },
    /// Show what a merge would change without writing (exit 1 if stale)
    Check {
        #[command(flatten)]
        overrides: MergeArgs,
        /// Number of context lines (default: 3)
        #[arg(short = 'U', long, default_value = "3")]
        context: usize,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show {
        #[command(flatten)]
        overrides: MergeArgs,
    },
    /// Print an annotated example config file
    Example,
}

/// Command-line overrides for config file values
#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    /// Glob matching fragment files
    #[arg(long)]
    pub src: Option<String>,

    /// Output directory
    #[arg(long)]
    pub dist: Option<PathBuf>,

    /// Root for namespace paths
    #[arg(long)]
    pub base: Option<String>,

    /// Spaces per indentation level (0 = compact)
    #[arg(long)]
    pub indent_size: Option<usize>,

    /// File whose merged tree is the reconciliation reference
    #[arg(long)]
    pub target: Option<String>,

    /// Files to reconcile against the target (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub files: Option<Vec<String>>,

    /// Marker appended to untranslated keys
    #[arg(long)]
    pub suffix: Option<String>,

    /// Keep keys that only exist in the previous output
    #[arg(long)]
    pub safe_mode: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { overrides } => {
            cmd::run::run(Settings::load(config_path, &overrides)?).await
        }
        Commands::Watch { overrides } => {
            cmd::watch::run(Settings::load(config_path, &overrides)?).await
        }
        Commands::Check { overrides, context } => {
            cmd::check::run(Settings::load(config_path, &overrides)?, context).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show { overrides } => {
                cmd::config::run_show(Settings::load(config_path, &overrides)?).await
            }
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
