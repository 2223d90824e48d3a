//! Order preparation.

use crate::decay::{max_age, HOME_FACTOR};
use crate::model::{Order, ShelfItem};
use tokio::time::Instant;

/// Turns a received order into a shelf item, prepared at `now` with the
/// home-shelf budget.
pub fn prepare(order: Order, now: Instant) -> ShelfItem {
    let budget = max_age(order.shelf_life, order.decay_rate, HOME_FACTOR);
    ShelfItem::new(order, now, budget)
}
