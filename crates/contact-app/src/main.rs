//! Contact App - Entry point.

use anyhow::Context;
use axum::ServiceExt;
use contact_app::{
    api::{create_router_with_public_dir, with_method_override, AppState},
    config::Config,
    views::Views,
};
use contact_store::{Backend, DocumentStore};
use session_store::SessionStore;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting Contact App");

    // Initialize storage
    let backend = if config.storage.persist {
        info!("Persisting contacts to {:?}", config.storage.path);
        Backend::file(&config.storage.path)
    } else {
        info!("Persistence disabled, using in-memory storage");
        Backend::Memory
    };
    let store = DocumentStore::open(backend)
        .await
        .context("Failed to open contact store")?;

    let sessions = SessionStore::new(config.session.ttl);
    let views = Views::new().context("Failed to load templates")?;

    // Create application state
    let state = AppState::new(Arc::new(store), sessions, views)
        .with_cookie_name(&config.session.cookie_name);

    let app = with_method_override(create_router_with_public_dir(
        state,
        &config.server.public_dir,
    ));

    // Bind to address
    let ip = config
        .server
        .listen_addr
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid listen address {:?}", config.server.listen_addr))?;
    let addr = SocketAddr::new(ip, config.server.port);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Contact app | listening at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")
}
