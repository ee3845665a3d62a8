use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use complaint_intake::adapters::{
    intake_routes, FileSessionStore, InMemoryComplaintMaterializer, InMemorySessionStore,
    IntakeAppState, LocalFileDocumentDelivery, PostgresComplaintRepository,
};
use complaint_intake::application::{InboundMessageHandler, SessionRegistry, SessionSweeper};
use complaint_intake::config::AppConfig;
use complaint_intake::domain::intake::ConversationEngine;
use complaint_intake::ports::{ComplaintMaterializer, SessionStore};

#[tokio::main]
async fn main() {
    // --- Configuration ---
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    // --- Tracing ---
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // --- Session store ---
    let store: Arc<dyn SessionStore> = match &config.session.store_dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "Using file session store");
            Arc::new(FileSessionStore::new(dir))
        }
        None => {
            tracing::info!("Using in-memory session store");
            Arc::new(InMemorySessionStore::new())
        }
    };
    let registry = Arc::new(SessionRegistry::new(
        store,
        config.session.inactivity_timeout(),
    ));

    // --- Complaint materializer ---
    let materializer: Arc<dyn ComplaintMaterializer> = match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            if database.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");
            }
            Arc::new(PostgresComplaintRepository::new(pool))
        }
        None => {
            tracing::warn!("No database configured, complaints are kept in memory");
            Arc::new(InMemoryComplaintMaterializer::new())
        }
    };

    // --- Document delivery ---
    let delivery = Arc::new(LocalFileDocumentDelivery::new(config.delivery.output_path()));
    tracing::info!(dir = %config.delivery.output_dir, "Complaint forms will be written locally");

    // --- Session sweeper ---
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = SessionSweeper::new(
        Arc::clone(&registry),
        config.session.sweep_interval(),
        config.session.inactivity_timeout(),
    );
    let sweeper_handle = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    // --- Router ---
    let handler = InboundMessageHandler::new(
        registry,
        ConversationEngine::default(),
        materializer,
        delivery,
    );
    let app = intake_routes(IntakeAppState::new(Arc::new(handler)))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    // --- Start server ---
    let addr = config.server.socket_addr().expect("Invalid bind address");
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, stopping sweeper");
    let _ = shutdown_tx.send(true);
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), sweeper_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
