//! # hearthd — hearth daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hearth.toml` plus `HEARTH_*` environment overrides)
//! - Initialize `tracing` with the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use hearth_adapter_http_axum::state::AppState;
use hearth_adapter_storage_sqlite_sqlx::{
    SqliteListingRepository, SqliteReservationRepository, SqliteUserRepository,
};
use hearth_app::event_bus::InProcessEventBus;
use hearth_app::services::listing_service::ListingService;
use hearth_app::services::reservation_service::ReservationService;
use hearth_app::services::user_service::UserService;
use hearth_domain::event::Event;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = hearth_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();
    tracing::info!(url = config.database_url(), "database ready");

    // Repositories, shared between the listing and reservation services
    let listings = Arc::new(SqliteListingRepository::new(pool.clone()));
    let reservations = Arc::new(SqliteReservationRepository::new(pool.clone()));
    let users = Arc::new(SqliteUserRepository::new(pool));

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    tokio::spawn(log_events(event_bus.subscribe()));

    // Services
    let listing_service = ListingService::new(
        Arc::clone(&listings),
        Arc::clone(&reservations),
        Arc::clone(&users),
        Arc::clone(&event_bus),
    );
    let reservation_service =
        ReservationService::new(listings, reservations, Arc::clone(&users), event_bus);
    let user_service = UserService::new(users);

    // HTTP
    let state = AppState::new(listing_service, reservation_service, user_service);
    let app = hearth_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("hearthd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hearthd stopped");
    Ok(())
}

async fn log_events(mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::debug!(
                event_type = ?event.event_type,
                listing_id = %event.listing_id,
                "event"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event log lagging behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
