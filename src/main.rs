//! Billed main entry point

use anyhow::Context;
use billed_api::start_server;
use billed_config::{Config, ConfigError, StoreKind};
use billed_core::{MemoryStore, RemoteStore, StoreRef};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "billed")]
#[command(author = "Billed Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight expense report web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a commented default configuration and exit
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
            return Err(e).with_context(|| format!("Failed to load {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }

    let store: StoreRef = match config.store.kind {
        StoreKind::Memory => {
            log::info!("Using in-memory bill store");
            Arc::new(MemoryStore::with_fixture())
        }
        StoreKind::Remote => {
            log::info!("Using remote bill store at {}", config.store.base_url);
            Arc::new(RemoteStore::from_config(&config.store).context("Failed to build the remote store client")?)
        }
    };

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, store))?;

    Ok(())
}
