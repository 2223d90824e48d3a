use crate::dispatch_actor::DispatchContext;
use crate::model::{Order, OrderStatus};
use tracing::{debug, info, warn};

/// How a courier's visit ended. Every visit ends in one of these; none is an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickupOutcome {
    PickedFromHome,
    PickedFromOverflow,
    /// Gone, and last recorded as expired.
    AlreadyExpired,
    /// Gone, and last recorded as evicted.
    AlreadyEvicted,
    /// Gone, with the last status on record (if any).
    Missing(Option<OrderStatus>),
    /// The order names no known temperature.
    Rejected,
}

/// Removes `order` from whichever tier holds it.
///
/// Removal is a direct `delete`, so losing a race to the reaper or to
/// promotion shows up as `NotFound` and falls through to the next tier. An
/// item handed from overflow to admission is briefly on neither shelf; a
/// courier arriving in that window reports it missing.
pub async fn pickup(ctx: &DispatchContext, order: &Order) -> PickupOutcome {
    let temperature = match order.temperature() {
        Ok(t) => t,
        Err(e) => {
            warn!(order_id = %order.id, error = %e, "Courier abandoned order");
            return PickupOutcome::Rejected;
        }
    };

    if ctx.registry.home(temperature).delete(&order.id).is_ok() {
        let _ = ctx.supervisor.report(&order.id, OrderStatus::Picked).await;
        let _ = ctx.storage.space_freed(temperature).await;
        return PickupOutcome::PickedFromHome;
    }

    if ctx.registry.overflow(temperature).delete(&order.id).is_ok() {
        let _ = ctx.supervisor.report(&order.id, OrderStatus::Picked).await;
        return PickupOutcome::PickedFromOverflow;
    }

    match ctx.supervisor.last_status(&order.id) {
        Some(OrderStatus::Expired) => PickupOutcome::AlreadyExpired,
        Some(OrderStatus::Evicted) => PickupOutcome::AlreadyEvicted,
        other => {
            debug!(order_id = %order.id, last = ?other, "Order not on any shelf");
            PickupOutcome::Missing(other)
        }
    }
}

pub(crate) fn log_outcome(order: &Order, outcome: &PickupOutcome) {
    match outcome {
        PickupOutcome::PickedFromHome | PickupOutcome::PickedFromOverflow => {
            info!(order_id = %order.id, name = %order.name, ?outcome, "Picked up")
        }
        PickupOutcome::Rejected => {}
        _ => info!(order_id = %order.id, ?outcome, "Nothing to pick up"),
    }
}
