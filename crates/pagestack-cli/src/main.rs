use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagestack_core::{PagestackConfig, PagingOptions};

mod commands;

#[derive(Parser)]
#[command(name = "pagestack")]
#[command(author, version, about = "Snapped full-screen paging for terminal decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/pagestack/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through a deck in the terminal
    Run {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Start at this fragment, e.g. "#usage" or "usage/details"
        #[arg(long)]
        at: Option<String>,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Initialize a deck without a terminal and print the resulting pages
    Check {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Print built-in defaults instead of the loaded file
        #[arg(long)]
        defaults: bool,
    },
}

/// Paging overrides applied on top of the configuration file
#[derive(Args, Default)]
struct PagingArgs {
    /// Slide direction (up, down, left, right, vertical, horizontal)
    #[arg(long)]
    direction: Option<String>,
    /// Transition duration in milliseconds
    #[arg(long)]
    speed: Option<u64>,
    /// Wrap around at both ends
    #[arg(long = "loop")]
    loop_pages: bool,
    /// Follow and write the address fragment
    #[arg(long)]
    hash_history: bool,
    /// Menu selector, e.g. "#ps-menu"
    #[arg(long)]
    menu: Option<String>,
}

impl PagingArgs {
    fn options(&self) -> PagingOptions {
        PagingOptions {
            direction: self.direction.clone(),
            scrolling_speed_ms: self.speed,
            loop_top: self.loop_pages.then_some(true),
            loop_bottom: self.loop_pages.then_some(true),
            hash_history: self.hash_history.then_some(true),
            menu: self.menu.clone(),
            ..Default::default()
        }
    }
}

fn load_config(path: Option<&PathBuf>, paging: Option<&PagingArgs>) -> Result<PagestackConfig> {
    let mut config = match path {
        Some(path) => PagestackConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PagestackConfig::load()?,
    };
    if let Some(paging) = paging {
        config.merge(&paging.options());
    }
    config.validate()?;
    Ok(config)
}

/// The TUI owns the terminal, so `run` logs to a file; other commands log
/// to stderr.
fn init_logging(config: &PagestackConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(log_file)),
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

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { deck, at, paging } => {
            let config = load_config(cli.config.as_ref(), Some(&paging))?;
            init_logging(&config, true)?;
            commands::run::run(config, &deck, at).await
        }
        Commands::Check { deck, json, paging } => {
            let config = load_config(cli.config.as_ref(), Some(&paging))?;
            init_logging(&config, false)?;
            commands::check::run(config, &deck, json)
        }
        Commands::Config { defaults } => {
            let config = if defaults {
                PagestackConfig::default()
            } else {
                load_config(cli.config.as_ref(), None)?
            };
            commands::config::run(&config)
        }
    }
}
