use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planner_api::config::{LogFormat, ServerConfig};
use planner_api::router::build_app_router;
use planner_api::state::AppState;
use planner_core::itinerary::offset_from_minutes;
use planner_db::{DbPool, MemoryGateway, PersistenceGateway, PgGateway};
use planner_notify::{EmailConfig, LogNotifier, NotificationDispatcher, Notifier, SmtpNotifier};
use planner_workflow::TripWorkflow;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let itinerary_offset = offset_from_minutes(config.itinerary_utc_offset_minutes)
        .expect("ITINERARY_UTC_OFFSET_MINUTES out of range");

    // --- Persistence ---
    let (gateway, pool): (Arc<dyn PersistenceGateway>, Option<DbPool>) =
        match std::env::var("DATABASE_URL") {
            Ok(database_url) => {
                let pool = planner_db::create_pool(&database_url, config.db_max_connections)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                planner_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                planner_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let gateway: Arc<dyn PersistenceGateway> = Arc::new(PgGateway::new(pool.clone()));
                (gateway, Some(pool))
            }
            Err(_) => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
                let gateway: Arc<dyn PersistenceGateway> = Arc::new(MemoryGateway::new());
                (gateway, None)
            }
        };

    // --- Notifications ---
    let notifier: Arc<dyn Notifier> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(
                smtp_host = %email_config.smtp_host,
                smtp_port = email_config.smtp_port,
                "SMTP delivery enabled"
            );
            Arc::new(
                SmtpNotifier::new(email_config, Arc::clone(&gateway))
                    .expect("Invalid SMTP configuration"),
            )
        }
        None => {
            tracing::info!("SMTP_HOST not set, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let dispatcher = NotificationDispatcher::new(notifier);

    // --- App state ---
    let state = AppState {
        workflow: TripWorkflow::new(gateway, dispatcher.clone(), itinerary_offset),
        config: Arc::new(config.clone()),
        pool: pool.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    dispatcher
        .shutdown(Duration::from_secs(config.shutdown_timeout_secs))
        .await;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "planner_api=debug,planner_workflow=debug,planner_notify=debug,tower_http=debug".into()
    });
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .init();
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
