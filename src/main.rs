use std::sync::Arc;

use fabricplane::{
    api::start_api_server,
    backend::{DirectoryClient, NapiClient},
    config::{AppConfig, ObservabilityConfig},
    internal_api::NetworkServices,
    observability::{init_observability, log_config_info},
    Result, APP_NAME, VERSION,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let observability_config = ObservabilityConfig::from_env();
    init_observability(&observability_config)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting fabricplane API server");

    let config = AppConfig::from_env()?;
    log_config_info(&config);

    let backend = Arc::new(NapiClient::new(&config.backend)?);
    let directory = Arc::new(DirectoryClient::new(&config.backend)?);
    let services = Arc::new(NetworkServices::new(config.network.clone(), backend, directory));

    if let Err(e) = start_api_server(config.api.clone(), services).await {
        error!(error = %e, "API server terminated with error");
        return Err(e);
    }

    info!("fabricplane shutdown completed");
    Ok(())
}
