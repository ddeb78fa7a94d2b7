use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voice_webhook::config::Config;
use voice_webhook::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voice_webhook=debug,tower_http=debug")),
        )
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "conf.yaml".to_string());
    let mut config = Config::load_or_default(&config_path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    info!("Loaded configuration (file: {})", config_path);

    if !config.twilio_config.is_configured() {
        warn!("Twilio credentials are not configured");
    }
    warn!("Twilio request signatures are not validated; webhooks are unauthenticated");

    let app_state = AppState::new(config.clone())?;
    let app = voice_webhook::app(app_state);

    let system = &config.system_config;
    let listener = voice_webhook::bind(system)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}:{}: {}", system.host, system.port, e))?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
