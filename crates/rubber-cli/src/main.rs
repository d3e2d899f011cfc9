use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rubber_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "rubber")]
#[command(author, version, about = "An animated rubber page indicator for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive indicator
    Run {
        /// Number of pages (overrides ui.page_count)
        #[arg(short = 'p', long)]
        pages: Option<usize>,
    },
    /// Print the marker hops for an index change
    Plan {
        /// Number of pages
        #[arg(short = 'p', long, default_value_t = 5)]
        pages: usize,
        /// Current index
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i64,
        /// Requested index, clamped into range
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let interactive = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run { pages }) => commands::run::run(config, pages),
        None => commands::run::run(config, None),
        Some(Commands::Plan {
            pages,
            from,
            to,
            json,
        }) => commands::plan::run(pages, from, to, json),
        Some(Commands::Config) => commands::config::run(&config),
    }
}

/// Initialize logging. The TUI owns the terminal, so it logs to a file.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
