//! Healthcare device assistant server.

use std::sync::Arc;

use dotenvy::dotenv;
use healthcare_assistant_ui::{config::AppConfig, server, telemetry};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init(config.log.format);

    server::start_server(Arc::new(config)).await
}
