use std::sync::Arc;

use portfolio_api::handlers::{self, AppState};
use portfolio_api::store::{seed, SectionStore};
use portfolio_api::{config, mailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ADMIN_PASSWORD, PORTFOLIO_DB, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Portfolio API in {:?} mode", config.environment);

    let store = SectionStore::connect(&config.database.url).await?;
    seed::seed_if_empty(&store).await?;

    let mailer: Arc<dyn mailer::Mailer> = mailer::from_config(&config.mail);
    if config.mail.webhook_url.is_none() {
        tracing::warn!("CONTACT_WEBHOOK_URL not set, contact messages will only be logged");
    }

    let app = handlers::router(AppState::new(store, mailer));

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Portfolio API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
