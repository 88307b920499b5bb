//! Library API server
//!
//! Serves the book catalog over HTTP.

use std::net::SocketAddr;

use library_api::{api, config::AppConfig, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!("Starting Library API v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(config);
    tracing::info!(
        books = state.services.books.count().await,
        "Book store ready"
    );

    let app = api::router(state);

    tracing::info!("Available endpoints:");
    for (route, description) in api::ENDPOINTS {
        tracing::info!("- {} ({})", route, description);
    }
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
