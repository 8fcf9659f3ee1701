use std::sync::Arc;

use chat_assist::config::ServerConfig;
use chat_assist::dialogue::{DialogueEngine, SessionStore};
use chat_assist::server::chat_routes;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    eprintln!("💬 Chat Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Health: http://{}/api/health", config.bind_addr());
    eprintln!("   Chat:   http://{}/api/chat", config.bind_addr());
    eprintln!("   Reset:  http://{}/api/reset\n", config.bind_addr());

    let store = SessionStore::new();
    let engine = Arc::new(DialogueEngine::new(Arc::clone(&store)));

    // The chat widget runs in a browser on another origin.
    let app = chat_routes(engine, store).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "chat server started");
    axum::serve(listener, app).await?;

    Ok(())
}
