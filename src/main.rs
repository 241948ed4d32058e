use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gleaner::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "gleaner",
    version,
    about = "Discover and download AI-related articles from the open web",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan seed files for domains and collect article links into the queue
    Discover {
        /// Seed files containing URLs to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Download every queued link and save extracted articles to disk
    Download,

    /// Run discovery followed by download in one pass
    Run {
        /// Seed files containing URLs to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show queue and output directory status
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("gleaner starting");

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    match cli.command {
        Commands::Discover { inputs } => {
            tracing::info!(inputs = ?inputs, "Starting discover command");
            commands::discover(&config, &inputs).await?;
        }

        Commands::Download => {
            tracing::info!("Starting download command");
            commands::download(&config).await?;
        }

        Commands::Run { inputs } => {
            tracing::info!(inputs = ?inputs, "Starting run command");
            commands::run(&config, &inputs).await?;
        }

        Commands::Stats => {
            tracing::info!("Starting stats command");
            commands::stats(&config)?;
        }
    }

    tracing::info!("gleaner completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("gleaner=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("gleaner=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
