use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use rummage::store::{CatalogSeed, MemoryCatalog};
use rummage::{EngineConfig, SearchEngine};
use rummage_http::{serve, ServerConfig};

#[derive(Parser)]
#[command(name = "rummage")]
struct Cli {
    #[arg(long, env = "RUMMAGE_BIND_ADDR", default_value = "127.0.0.1:7800")]
    bind_addr: String,

    /// Token required for the privileged backfill/migrate routes.
    #[arg(long, env = "RUMMAGE_ADMIN_KEY")]
    admin_key: Option<String>,

    /// JSON catalog seed ({"categories": [...], "products": [...], "events": [...]}).
    #[arg(long, env = "RUMMAGE_SEED_FILE")]
    seed: Option<PathBuf>,

    /// Per-request deadline in milliseconds.
    #[arg(long, env = "RUMMAGE_DEADLINE_MS", default_value = "10000")]
    deadline_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let catalog = match &cli.seed {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let seed: CatalogSeed = serde_json::from_str(&raw)?;
            let catalog = MemoryCatalog::from_seed(seed);
            // Subscriber isn't up yet; plain stderr like the rest of the CLI.
            eprintln!(
                "Seeded {} products from {}",
                catalog.product_count(),
                path.display()
            );
            catalog
        }
        None => MemoryCatalog::new(),
    };

    let engine = Arc::new(SearchEngine::with_config(
        Arc::new(catalog),
        EngineConfig {
            request_deadline: Duration::from_millis(cli.deadline_ms),
            ..EngineConfig::default()
        },
    ));

    serve(
        engine,
        ServerConfig {
            bind_addr: cli.bind_addr,
            admin_key: cli.admin_key,
        },
    )
    .await
}
