use crate::framework::EventHandler;
use crate::model::{OrderReadyForStorage, OrderStatus};
use crate::storage_actor::StorageContext;
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Places ready items on their home shelf.
///
/// This is the only writer of home shelves, so the capacity check and the
/// push can't be interleaved with another push. Removals can still happen in
/// between; they only make room.
pub struct AdmissionHandler;

#[async_trait]
impl EventHandler for AdmissionHandler {
    type Event = OrderReadyForStorage;
    type Context = StorageContext;

    fn name(&self) -> &'static str {
        "admission"
    }

    async fn handle(&mut self, event: OrderReadyForStorage, ctx: &StorageContext) {
        let OrderReadyForStorage(item) = event;

        let home = match ctx.registry.resolve(&item.order.temp) {
            Ok(shelf) => shelf,
            Err(e) => {
                warn!(order_id = %item.id(), error = %e, "Rejected");
                return;
            }
        };

        if item.is_expired(Instant::now()) {
            info!(order_id = %item.id(), "Expired on arrival");
            let _ = ctx.supervisor.report(item.id(), OrderStatus::Expired).await;
            return;
        }

        if home.is_full() {
            debug!(order_id = %item.id(), temperature = %home.temperature(), "Home shelf full");
            let _ = ctx.storage.request_overflow(item).await;
            return;
        }

        let order_id = item.id().to_string();
        let budget = item.max_life_time_s;
        match home.push(item) {
            Ok(()) => info!(
                %order_id,
                temperature = %home.temperature(),
                budget,
                size = home.size(),
                "Stored"
            ),
            Err(e) => error!(%order_id, error = %e, "Push failed, item dropped"),
        }
    }
}
