use std::sync::Arc;
use std::time::Duration;

use inkwell_events::{EventBus, NotificationWriter};
use inkwell_worker::WaitlistFulfiller;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seconds between scheduled fulfilment runs.
const DEFAULT_POLL_SECS: u64 = 60;
/// Milliseconds between allocations within one run.
const DEFAULT_PACING_MS: u64 = 3000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkwell_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let poll_secs: u64 = std::env::var("WAITLIST_POLL_SECS")
        .ok()
        .map(|v| v.parse().expect("WAITLIST_POLL_SECS must be a valid u64"))
        .unwrap_or(DEFAULT_POLL_SECS);
    let pacing_ms: u64 = std::env::var("WAITLIST_PACING_MS")
        .ok()
        .map(|v| v.parse().expect("WAITLIST_PACING_MS must be a valid u64"))
        .unwrap_or(DEFAULT_PACING_MS);

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = inkwell_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    inkwell_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool ready");

    let event_bus = Arc::new(EventBus::default());
    let writer_handle = tokio::spawn(NotificationWriter::run(pool.clone(), event_bus.subscribe()));

    let fulfiller = Arc::new(WaitlistFulfiller::new(
        pool,
        Arc::clone(&event_bus),
        Duration::from_millis(pacing_ms),
    ));
    let cancel = CancellationToken::new();
    let loop_handle = tokio::spawn(
        Arc::clone(&fulfiller).run_periodic(cancel.clone(), Duration::from_secs(poll_secs)),
    );

    tracing::info!(poll_secs, pacing_ms, "Worker started");
    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), loop_handle).await;

    // The fulfiller holds a clone of the bus; both must go before the writer sees Closed.
    drop(fulfiller);
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), writer_handle).await;

    tracing::info!("Worker stopped");
}

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
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C)"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
