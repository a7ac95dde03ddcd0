use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod assessment;
mod auth;
mod config;
mod error;
mod models;
mod routes;
mod store;
mod views;
#[cfg(test)]
mod testing;

use assessment::classifier::LinearClassifier;
use auth::password::PasswordHasher;
use auth::session::SessionStore;
use config::Config;
use routes::AppState;
use store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => Store::connect(url, config.db_max_connections).await?,
        None => {
            tracing::warn!("⚠️ DATABASE_URL not set, records are kept in memory only");
            Store::in_memory()
        }
    };

    let classifier = LinearClassifier::load(&config.model_path)?;
    tracing::info!(
        path = %config.model_path.display(),
        classes = classifier.class_count(),
        "🧠 Severity model loaded"
    );

    let state = AppState {
        store,
        classifier: Arc::new(classifier),
        sessions: SessionStore::new(config.session_ttl),
        hasher: PasswordHasher::new(config.pbkdf2_iterations),
        require_login: config.require_login,
    };

    let app = routes::app(state);

    let addr = config.bind_addr;
    tracing::info!("🫁 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
