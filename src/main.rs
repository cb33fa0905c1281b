use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use currency_exchange::config::{load_config, AppConfig};
use currency_exchange::observability::logging;
use currency_exchange::{HttpServer, Store};

#[derive(Parser)]
#[command(name = "currency-exchange", about = "Currency exchange HTTP service")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        base_currency = %config.exchange.base_currency,
        "Configuration loaded"
    );

    let store = Store::open(&config.database.path)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, store);
    server.run(listener).await?;

    Ok(())
}
