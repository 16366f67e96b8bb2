//! Backoffice Server - administrative backend
//!
//! REST API server for back-office administration: accounts, dashboard
//! overview, and the equipment inventory.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backoffice_server::{
    config::AppConfig,
    create_router,
    repository::Repository,
    services::{crm, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("backoffice_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Backoffice Server v{}", env!("CARGO_PKG_VERSION"));

    // Pick the storage engine. An empty database URL selects the volatile
    // in-memory engine so the server can run without any infrastructure.
    let repository = if config.database.url.is_empty() {
        tracing::warn!("No database configured, using the in-memory store (nothing is persisted)");
        Repository::in_memory()
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .connect(&config.database.url)
            .await
            .expect("Failed to connect to database");

        tracing::info!("Connected to database");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run database migrations");

        tracing::info!("Database migrations completed");

        Repository::postgres(pool)
    };

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let providers = crm::providers_from_config(&config.crm)?;
    let services = Services::new(repository, config.auth.clone(), providers);

    // Create the bootstrap admin account when one is configured
    if let Some(ref password) = config.bootstrap.admin_password {
        services
            .users
            .ensure_admin(
                &config.bootstrap.admin_username,
                &config.bootstrap.admin_email,
                password,
            )
            .await
            .expect("Failed to create bootstrap admin account");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
