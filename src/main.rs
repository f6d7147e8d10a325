//! camp - virtualenvs and a shared wheelhouse for sibling Python packages
//!
//! CLI entry point that dispatches to subcommands.

use camp::cli::{Cli, Commands, LogFormat};
use camp::config::ConfigManager;
use camp::error::{CampError, CampResult};
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                println!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CampResult<()> {
    let cli = Cli::parse();

    // 0 = warn (spinners only), 1 = info (tool output), 2+ = debug (commands)
    let filter = match cli.verbose {
        0 => EnvFilter::new("camp=warn"),
        1 => EnvFilter::new("camp=info"),
        _ => EnvFilter::new("camp=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let root = match cli.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir().map_err(|e| CampError::io("getting current directory", e))?,
    };

    // Commands that don't need config loading
    match cli.command {
        Commands::Completions(args) => return camp::cli::commands::completions(args),
        Commands::Init(args) => return camp::cli::commands::init(args, &root).await,
        _ => {}
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let found = ConfigManager::find_local_config(&root);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    match cli.command {
        Commands::Completions(_) | Commands::Init(_) => Ok(()),
        Commands::Up(args) => camp::cli::commands::up(args, &config, &root).await,
        Commands::Down => camp::cli::commands::down(&config, &root).await,
        Commands::Show(args) => camp::cli::commands::show(args, &config, &root).await,
        Commands::Status => camp::cli::commands::status(&config, &root).await,
        Commands::Config(args) => {
            camp::cli::commands::config(args, &config, &config_manager, &root).await
        }
    }
}
