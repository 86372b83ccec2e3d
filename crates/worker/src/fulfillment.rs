//! Waitlist fulfilment engine.
//!
//! A run loads the FCFS waitlist and current stock, plans which entries can
//! be served with [`plan_allocations`], then moves each allocated entry into
//! its owner's cart in its own transaction. Only one run may be in flight at
//! a time; [`WaitlistFulfiller::try_start`] is the guard.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_core::waitlist::{plan_allocations, Allocation, QueuedEntry};
use inkwell_db::error::DbError;
use inkwell_db::models::product::Product;
use inkwell_db::repositories::{CartRepo, ProductRepo, WaitlistRepo};
use inkwell_db::DbPool;
use inkwell_events::{event_types, EventBus, PlatformEvent};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Outcome counts for one fulfilment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FulfillmentReport {
    /// Allocations attempted.
    pub processed: usize,
    pub fulfilled: usize,
    pub failed: usize,
}

/// Clears the running flag when a run ends, including on early return.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct WaitlistFulfiller {
    pool: DbPool,
    bus: Arc<EventBus>,
    pacing: Duration,
    running: AtomicBool,
}

impl WaitlistFulfiller {
    /// `pacing` is the pause between consecutive allocations within a run.
    pub fn new(pool: DbPool, bus: Arc<EventBus>, pacing: Duration) -> Self {
        Self {
            pool,
            bus,
            pacing,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Claim the run slot. Returns `false` if a run is already in progress.
    pub fn try_start(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Drain the waitlist once. The caller claims the slot with
    /// [`try_start`](Self::try_start) first; the slot is released when this
    /// returns, whether or not the run succeeded.
    pub async fn run_once(&self) -> Result<FulfillmentReport, DbError> {
        let _guard = RunningGuard(&self.running);

        let entries = WaitlistRepo::list(&self.pool).await?;
        if entries.is_empty() {
            tracing::debug!("Waitlist empty, nothing to fulfil");
            return Ok(FulfillmentReport::default());
        }

        let stock: HashMap<DbId, i32> = ProductRepo::list_in_stock(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p.quantity_in_stock))
            .collect();
        let queued: Vec<QueuedEntry> = entries.iter().map(QueuedEntry::from).collect();
        let allocations = plan_allocations(&stock, &queued);

        let mut report = FulfillmentReport {
            processed: allocations.len(),
            ..Default::default()
        };

        for (i, allocation) in allocations.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            match self.fulfil(allocation).await {
                Ok(product) => {
                    report.fulfilled += 1;
                    tracing::info!(
                        entry_id = allocation.entry_id,
                        user_id = allocation.user_id,
                        product_id = allocation.product_id,
                        "Waitlist entry moved to cart"
                    );
                    self.bus.publish(
                        PlatformEvent::new(event_types::WAITLIST_FULFILLED)
                            .with_source("waitlist_entry", allocation.entry_id)
                            .with_actor(allocation.user_id)
                            .with_payload(serde_json::json!({
                                "product_id": product.id,
                                "comic_name": product.comic_name,
                                "volume_name": product.volume_name,
                            })),
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        error = %e,
                        entry_id = allocation.entry_id,
                        product_id = allocation.product_id,
                        "Waitlist allocation skipped"
                    );
                }
            }
        }

        Ok(report)
    }

    /// One allocation, one transaction: consume the entry, take a unit of
    /// stock, add it to the cart.
    async fn fulfil(&self, allocation: &Allocation) -> Result<Product, DbError> {
        let mut tx = self.pool.begin().await?;

        if !WaitlistRepo::take(&mut *tx, allocation.entry_id).await? {
            return Err(CoreError::Conflict(format!(
                "Waitlist entry {} was already fulfilled",
                allocation.entry_id
            ))
            .into());
        }
        let product = ProductRepo::reserve(&mut *tx, allocation.product_id, 1).await?;
        CartRepo::add_or_increment(&mut *tx, allocation.user_id, allocation.product_id, 1).await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Start a run in the background. Returns `false` without spawning if a
    /// run is already in progress.
    pub fn spawn_run(self: &Arc<Self>) -> bool {
        if !self.try_start() {
            return false;
        }
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = this.run_once().await;
            log_outcome(&outcome);
        });
        true
    }

    /// Run on a fixed interval until `cancel` fires. Ticks that find a run
    /// already in progress are skipped.
    pub async fn run_periodic(self: Arc<Self>, cancel: CancellationToken, interval: Duration) {
        tracing::info!(
            interval_secs = interval.as_secs(),
            pacing_ms = self.pacing.as_millis() as u64,
            "Waitlist fulfilment loop started"
        );

        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Waitlist fulfilment loop stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if !self.try_start() {
                        tracing::debug!("Fulfilment run already in progress, skipping tick");
                        continue;
                    }
                    log_outcome(&self.run_once().await);
                }
            }
        }
    }
}

fn log_outcome(outcome: &Result<FulfillmentReport, DbError>) {
    match outcome {
        Ok(report) if report.processed > 0 => tracing::info!(
            processed = report.processed,
            fulfilled = report.fulfilled,
            failed = report.failed,
            "Waitlist fulfilment run finished"
        ),
        Ok(_) => tracing::debug!("Waitlist fulfilment run found no stock to allocate"),
        Err(e) => tracing::error!(error = %e, "Waitlist fulfilment run failed"),
    }
}
