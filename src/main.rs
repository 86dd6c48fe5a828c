use anyhow::Result;
use company_registry::{config::Config, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    telemetry::init(&config.telemetry);

    info!("Starting Company Registry Service");
    info!("HTTP server listening on {}", config.http_addr());

    server::run(config).await
}
