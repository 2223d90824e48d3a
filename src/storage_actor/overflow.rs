use crate::decay::{max_age, OVERFLOW_FACTOR};
use crate::framework::EventHandler;
use crate::model::{OrderStatus, OverflowRequested};
use crate::shelf::ShelfError;
use crate::storage_actor::StorageContext;
use async_trait::async_trait;
use rand::rngs::StdRng;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Stores items whose home shelf was full.
pub struct OverflowHandler {
    rng: StdRng,
}

impl OverflowHandler {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Removes one random overflow resident to make room.
    ///
    /// Losing the race for the victim (a courier or the reaper got it first)
    /// still leaves room, so nothing is retried.
    async fn evict_one(&mut self, ctx: &StorageContext) {
        let victim = match ctx.registry.random_overflow_victim(&mut self.rng) {
            Ok(victim) => victim,
            Err(e) => {
                debug!(error = %e, "No eviction victim");
                return;
            }
        };

        let compartment = match ctx.registry.resolve_overflow(&victim.order.temp) {
            Ok(shelf) => shelf,
            Err(e) => {
                error!(order_id = %victim.id(), error = %e, "Victim on unknown compartment");
                return;
            }
        };

        match compartment.delete(victim.id()) {
            Ok(evicted) => {
                info!(
                    order_id = %evicted.id(),
                    temperature = %compartment.temperature(),
                    "Evicted"
                );
                let _ = ctx.supervisor.report(evicted.id(), OrderStatus::Evicted).await;
            }
            Err(ShelfError::NotFound(id)) => debug!(order_id = %id, "Victim already gone"),
            Err(e) => error!(error = %e, "Eviction failed"),
        }
    }
}

#[async_trait]
impl EventHandler for OverflowHandler {
    type Event = OverflowRequested;
    type Context = StorageContext;

    fn name(&self) -> &'static str {
        "overflow"
    }

    async fn handle(&mut self, event: OverflowRequested, ctx: &StorageContext) {
        let OverflowRequested(mut item) = event;

        let compartment = match ctx.registry.resolve_overflow(&item.order.temp) {
            Ok(shelf) => shelf,
            Err(e) => {
                warn!(order_id = %item.id(), error = %e, "Rejected");
                return;
            }
        };

        let now = Instant::now();
        let budget = max_age(item.order.shelf_life, item.order.decay_rate, OVERFLOW_FACTOR)
            - item.age_s(now);
        if budget <= 0 {
            info!(order_id = %item.id(), budget, "Too stale for overflow");
            let _ = ctx.supervisor.report(item.id(), OrderStatus::Expired).await;
            return;
        }
        item.rebudget(budget, now);

        if ctx.registry.is_overflow_full() {
            self.evict_one(ctx).await;
        }

        let order_id = item.id().to_string();
        match compartment.push(item) {
            Ok(()) => info!(
                %order_id,
                temperature = %compartment.temperature(),
                budget,
                size = ctx.registry.overflow_len(),
                "Stored in overflow"
            ),
            Err(e) => error!(%order_id, error = %e, "Push failed, item dropped"),
        }
    }
}
