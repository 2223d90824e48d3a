use crate::decay::{max_age, HOME_FACTOR};
use crate::framework::EventHandler;
use crate::model::{OrderStatus, SpaceFreed};
use crate::storage_actor::StorageContext;
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

/// Moves the most urgent overflow item of a temperature back to admission
/// when its home shelf frees a slot.
///
/// The promoted budget is the home-shelf budget left at the item's age,
/// never more than what it had left in overflow.
pub struct PromotionHandler;

#[async_trait]
impl EventHandler for PromotionHandler {
    type Event = SpaceFreed;
    type Context = StorageContext;

    fn name(&self) -> &'static str {
        "promotion"
    }

    async fn handle(&mut self, event: SpaceFreed, ctx: &StorageContext) {
        let SpaceFreed(temperature) = event;

        let mut item = match ctx.registry.overflow(temperature).pop() {
            Ok(item) => item,
            Err(_) => {
                debug!(%temperature, "Nothing to promote");
                return;
            }
        };

        let now = Instant::now();
        let home_budget =
            max_age(item.order.shelf_life, item.order.decay_rate, HOME_FACTOR) - item.age_s(now);
        let budget = home_budget.min(item.remaining_s(now));
        if budget <= 0 {
            info!(order_id = %item.id(), %temperature, "Stale on promotion");
            let _ = ctx.supervisor.report(item.id(), OrderStatus::Evicted).await;
            return;
        }

        item.rebudget(budget, now);
        info!(order_id = %item.id(), %temperature, budget, "Promoted");
        let _ = ctx.storage.store(item).await;
    }
}
