//! Prefs API server binary.
//!
//! Builds the in-memory store and hands it to the API layer, which stays
//! agnostic of the storage backend.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use prefs::api::{self, ApiError, Config};
use prefs::store::MemoryStore;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(prefs::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "prefs-api")]
#[command(author, version, about = "Coding preference API server", long_about = None)]
struct Cli {
    /// Host address to bind to (overrides PREFS_HOST, default 0.0.0.0)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides PREFS_PORT, default 8080)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let mut config = Config::new();
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    api::run(config, MemoryStore::new()).await?;

    Ok(())
}
