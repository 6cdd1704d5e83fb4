//! Inventory server.
//!
//! # Usage
//!
//! ```bash
//! # SQLite file given on the command line
//! inventory parts.db
//!
//! # Or configured through the environment
//! INVENTORY_DATABASE_URL=memory INVENTORY_PORT=8080 inventory
//! ```

use inventory::{server, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory=debug,guiapi_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().with_args(std::env::args().skip(1));
    tracing::info!(
        database = %config.database.url,
        address = %config.bind_address(),
        assets = %config.assets_dir.display(),
        "Configuration loaded"
    );

    let parts = server::open_repository(&config).await?;
    server::serve(&config, parts).await
}
