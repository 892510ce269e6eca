//! Accountweb main entry point

use accountweb_api::start_server;
use accountweb_config::{Config, ConfigError};
use accountweb_core::{AccountsApiRef, HttpAccountsApi};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "accountweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web interface for managing bank accounts over a REST API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e).context("Failed to load configuration");
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if missing {
        log::warn!(
            "Config file {} not found, running with defaults",
            args.config.display()
        );
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }
    log::info!("Accounts API: {}", config.accounts_api.base_url);

    let api: AccountsApiRef = Arc::new(HttpAccountsApi::new(config.accounts_api.base_url.clone()));

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, api))
}
