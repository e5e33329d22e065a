use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logoslider_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "logoslider")]
#[command(author, version, about = "A terminal carousel of logos from a SharePoint list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site URL, overrides `source.site_url`
    #[arg(long, global = true)]
    site: Option<String>,

    /// Logo list name, overrides `source.list_name`
    #[arg(short = 'l', long = "list", global = true)]
    list: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List the site's lists that can be used as logo sources
    Sources,
    /// Print the logos of a list (`--list` or the configured one)
    Items,
    /// Show the config file path and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = AppConfig::config_path();
    let mut config = AppConfig::load_from(&config_path)?;
    if let Some(site) = cli.site {
        config.source.site_url = site;
    }
    if let Some(list) = cli.list {
        config.source.list_name = Some(list);
    }

    let command = cli.command.unwrap_or(Commands::Run);
    init_logging(&config, matches!(command, Commands::Run))?;

    match command {
        Commands::Run => commands::run::run(config, config_path).await,
        Commands::Sources => commands::sources::run(&config).await,
        Commands::Items => commands::items::run(&config).await,
        Commands::Config => commands::config::run(&config, &config_path),
    }
}

/// Logs go to stderr, or to a file while the TUI owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
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
