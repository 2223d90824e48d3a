use crate::model::Order;
use std::time::Duration;
use tokio::time::Instant;

/// A prepared order waiting on a shelf.
///
/// `max_life_time_s` is the remaining freshness budget, counted from
/// `budget_set_at`. Both are reset together whenever the item changes tier, so
/// the item spoils at [`ShelfItem::deadline`] no matter how often it moved.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfItem {
    pub order: Order,
    pub created_at: Instant,
    pub budget_set_at: Instant,
    pub max_life_time_s: i64,
}

impl ShelfItem {
    pub fn new(order: Order, created_at: Instant, max_life_time_s: i64) -> Self {
        Self {
            order,
            created_at,
            budget_set_at: created_at,
            max_life_time_s,
        }
    }

    pub fn id(&self) -> &str {
        &self.order.id
    }

    /// Whole seconds since preparation.
    pub fn age_s(&self, now: Instant) -> i64 {
        secs(now.saturating_duration_since(self.created_at))
    }

    /// Whole seconds of budget left at `now`; zero or less means spoiled.
    pub fn remaining_s(&self, now: Instant) -> i64 {
        self.max_life_time_s - secs(now.saturating_duration_since(self.budget_set_at))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining_s(now) <= 0
    }

    /// The instant the current budget runs out.
    pub fn deadline(&self) -> Instant {
        let budget = Duration::from_secs(self.max_life_time_s.max(0) as u64);
        self.budget_set_at + budget
    }

    /// Replaces the budget, counting from `now`.
    pub fn rebudget(&mut self, max_life_time_s: i64, now: Instant) {
        self.max_life_time_s = max_life_time_s;
        self.budget_set_at = now;
    }
}

fn secs(d: Duration) -> i64 {
    i64::try_from(d.as_secs()).unwrap_or(i64::MAX)
}
