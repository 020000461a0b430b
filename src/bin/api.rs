use credivue::{
    advisor::Advisor,
    api::start_server,
    auth::TokenKeys,
    client::GeminiClient,
    config::AppConfig,
    store::build_store,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("credivue=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    if config.gemini.api_key.is_empty() {
        warn!("GEMINI_API_KEY not set; advisor and lesson requests will fail until it is configured");
    }

    info!("🧭 CrediVue AI - API Server");
    info!("📍 Port: {}", config.port);
    info!("🤖 Model: {}", config.gemini.model);

    // Create components
    let store = build_store(&config);
    let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let advisor = Arc::new(Advisor::new(store, client));
    let keys = TokenKeys::from_config(&config.auth);

    info!("✅ Advisor initialized");
    info!("📡 Starting API server...");

    start_server(advisor, keys, config.port).await?;

    Ok(())
}
