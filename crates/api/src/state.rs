use std::sync::Arc;
use std::time::Duration;

use inkwell_core::access::ChapterRef;
use inkwell_core::cache::TtlCache;
use inkwell_core::types::DbId;
use inkwell_events::EventBus;
use inkwell_payments::PaymentGateway;
use inkwell_worker::WaitlistFulfiller;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Chapter lists per comic, consulted by the access checks.
pub type AccessCache = TtlCache<DbId, Vec<ChapterRef>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: inkwell_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
    /// Card payment provider (Stripe, or the mock in development).
    pub payments: Arc<dyn PaymentGateway>,
    /// Waitlist drain, shared with the `/waitlist/fulfil` trigger.
    pub fulfiller: Arc<WaitlistFulfiller>,
    pub access_cache: Arc<Mutex<AccessCache>>,
}

impl AppState {
    /// Assemble state, deriving the fulfiller and access cache from `config`.
    pub fn new(
        pool: inkwell_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<EventBus>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let fulfiller = Arc::new(WaitlistFulfiller::new(
            pool.clone(),
            Arc::clone(&event_bus),
            Duration::from_millis(config.waitlist_pacing_ms),
        ));
        let access_cache = Arc::new(Mutex::new(TtlCache::new(Duration::from_secs(
            config.access_cache_ttl_secs,
        ))));

        Self {
            pool,
            config: Arc::new(config),
            event_bus,
            payments,
            fulfiller,
            access_cache,
        }
    }
}
