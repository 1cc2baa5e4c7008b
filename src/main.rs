// src/main.rs
//! Multi-chain HD wallet CLI entry point
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use multichain_wallet::cli::{self, Cli, Commands, ConsoleNotifier};
use multichain_wallet::core::{config::AppConfig, WalletError};
use multichain_wallet::service::{Clipboard, Osc52Clipboard, UnavailableClipboard, WalletSession};
use multichain_wallet::storage::JsonFileStore;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    init_logging()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let command = match args.command {
        Commands::GenerateMnemonic { words } => return cli::generate_mnemonic(words, &mut out),
        command => command,
    };

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(store) = args.store {
        config.storage.path = store;
    }
    info!(store = %config.storage.path.display(), "opening wallet store");

    let store = JsonFileStore::new(config.storage.path.clone());
    let clipboard: Box<dyn Clipboard> = match Osc52Clipboard::stdout() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            debug!(error = %e, "terminal clipboard unavailable");
            Box::new(UnavailableClipboard)
        }
    };
    let mut session = WalletSession::open(Box::new(store), Box::new(ConsoleNotifier), clipboard, config);

    let result = match command {
        Commands::Shell => cli::run_shell(&mut session, io::stdin().lock(), &mut out),
        Commands::Session(command) => cli::execute(command, &mut session, &mut out),
        Commands::GenerateMnemonic { .. } => Ok(()),
    };
    drop(out);

    if let Err(e) = result {
        // Session failures were already printed by the notifier.
        if e.downcast_ref::<WalletError>().is_some() {
            std::process::exit(1);
        }
        return Err(e);
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
