//! Fairdice server binary

use clap::{Parser, Subcommand};
use fairdice::{
    api::ApiServer,
    config::ConfigLoader,
    games::{verification_hash, ThreadRngGenerator},
    FairDiceResult, JsonFileStore, TransactionCoordinator,
};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser, Debug)]
#[command(name = "fairdice")]
#[command(about = "Provably-fair dice wagering server", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// JSON file holding balance and history (overrides config)
    #[arg(long)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute the verification hash of a recorded bet
    Verify {
        #[arg(long)]
        server_seed: String,
        #[arg(long)]
        client_seed: String,
        #[arg(long)]
        nonce: String,
    },
}

#[tokio::main]
async fn main() -> FairDiceResult<()> {
    let args = Args::parse();

    if let Some(Command::Verify {
        server_seed,
        client_seed,
        nonce,
    }) = &args.command
    {
        println!("{}", verification_hash(server_seed, client_seed, nonce));
        return Ok(());
    }

    let loader = match &args.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }
    ConfigLoader::validate(&config)?;

    let store = Arc::new(JsonFileStore::new(&config.storage.data_file));
    let coordinator = Arc::new(TransactionCoordinator::new(
        store,
        Arc::new(ThreadRngGenerator),
        config.fairness.clone(),
    ));

    ApiServer::new(config.server, coordinator).run().await
}
