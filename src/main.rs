use color_eyre::eyre::Result;
use coursegrid_api::config::ApiConfig;
use coursegrid_catalog::{InMemorySessionCache, source_for};
use dotenv::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Catalog source and the session cache in front of it
    let source = source_for(&config.catalog_base_url);
    let cache = Arc::new(InMemorySessionCache::new());

    // Start API server
    coursegrid_api::start_server(config, source, cache).await?;

    Ok(())
}
