//! tubesent CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tubesent::{
    commands::{
        cmd_collect, cmd_init, cmd_status, print_collect_report, print_status, CollectOptions,
    },
    config::Config,
    error::Result,
    progress::ProgressLogWriter,
};

#[derive(Parser)]
#[command(name = "tubesent")]
#[command(version, about = "Collect sentiment scores for YouTube video titles", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize tubesent configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Score video titles and append results to the ledger
    Collect {
        /// Input CSV of videos (needs youtube_id and title columns)
        videos: PathBuf,

        /// Ledger path (defaults to collect.output from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only process the first N videos
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Summarize an existing ledger
    Status {
        /// Ledger path (defaults to collect.output from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(ProgressLogWriter::default()))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { force } => {
            let base_dir = cli.config.as_deref().and_then(|p| {
                if p.extension().is_some() {
                    p.parent().map(PathBuf::from)
                } else {
                    Some(p.to_path_buf())
                }
            });
            let config = cmd_init(base_dir, force)?;

            println!("✓ tubesent initialized");
            println!("  Config: {}", config.paths.config_file.display());
            println!("\nNext steps:");
            println!("  1. Export your API key: export {}=...", config.api.key_env);
            println!("  2. Collect scores: tubesent collect videos.csv");
        }

        Commands::Collect {
            videos,
            output,
            limit,
        } => {
            let config = load_config(cli.config)?;
            let report = cmd_collect(
                &config,
                CollectOptions {
                    videos,
                    output,
                    limit,
                },
            )
            .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_collect_report(&report);
            }
        }

        Commands::Status { output } => {
            let config = load_config(cli.config)?;
            let summary = cmd_status(&config, output)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_status(&summary);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tubesent", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration: an explicit --config path must exist; otherwise the
/// default location is used, falling back to built-in defaults when no
/// config file has been written yet.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::load_from(None),
    }
}
