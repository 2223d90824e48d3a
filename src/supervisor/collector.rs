//! # Status Collector
//!
//! Append-only log of order status transitions, shared behind an `Arc`.
//!
//! One `parking_lot` lock guards the whole ledger. Every operation is a few
//! map updates, so contention stays low even with every worker reporting.

use crate::model::{OrderStatus, StatusRecorded};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use tokio::time::Instant;

#[derive(Debug)]
struct Ledger {
    history: HashMap<String, Vec<OrderStatus>>,
    last: HashMap<String, OrderStatus>,
    counts: HashMap<OrderStatus, usize>,
    settled: usize,
    last_activity: Instant,
}

#[derive(Debug)]
pub struct StatusCollector {
    ledger: Mutex<Ledger>,
}

impl Default for StatusCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCollector {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(Ledger {
                history: HashMap::new(),
                last: HashMap::new(),
                counts: HashMap::new(),
                settled: 0,
                last_activity: Instant::now(),
            }),
        }
    }

    /// Appends to the order's history and overwrites its last known status.
    pub fn record(&self, event: StatusRecorded) {
        let StatusRecorded { order_id, status } = event;
        let mut ledger = self.ledger.lock();

        let was_settled = ledger
            .last
            .get(&order_id)
            .is_some_and(OrderStatus::is_terminal);
        if status.is_terminal() && !was_settled {
            ledger.settled += 1;
        }

        *ledger.counts.entry(status).or_default() += 1;
        ledger.history.entry(order_id.clone()).or_default().push(status);
        ledger.last.insert(order_id, status);
        ledger.last_activity = Instant::now();
    }

    pub fn last_status(&self, order_id: &str) -> Option<OrderStatus> {
        self.ledger.lock().last.get(order_id).copied()
    }

    /// The order was last seen spoiling.
    pub fn is_trashed(&self, order_id: &str) -> bool {
        self.last_status(order_id) == Some(OrderStatus::Expired)
    }

    pub fn is_evicted(&self, order_id: &str) -> bool {
        self.last_status(order_id) == Some(OrderStatus::Evicted)
    }

    /// Every status recorded for the order, oldest first.
    pub fn history(&self, order_id: &str) -> Vec<OrderStatus> {
        self.ledger
            .lock()
            .history
            .get(order_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.ledger.lock().counts.get(&status).copied().unwrap_or(0)
    }

    /// Orders whose last status is terminal.
    pub fn settled(&self) -> usize {
        self.ledger.lock().settled
    }

    /// When the last status was recorded, or when the collector was created.
    pub fn last_activity(&self) -> Instant {
        self.ledger.lock().last_activity
    }

    pub fn summarize(&self) -> StatusSummary {
        let ledger = self.ledger.lock();
        let count = |status: OrderStatus| ledger.counts.get(&status).copied().unwrap_or(0);
        StatusSummary::from_counts(
            count(OrderStatus::Received),
            count(OrderStatus::Processed),
            count(OrderStatus::Picked),
            count(OrderStatus::Expired),
            count(OrderStatus::Evicted),
        )
    }
}

/// Aggregate counts and the derived percentages.
///
/// A percentage over a zero denominator is reported as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    pub received: usize,
    pub processed: usize,
    pub picked: usize,
    pub expired: usize,
    pub evicted: usize,
    /// processed / received
    pub processed_pct: f64,
    /// picked / processed
    pub delivery_pct: f64,
    /// expired / processed
    pub expired_pct: f64,
    /// evicted / processed
    pub evicted_pct: f64,
    /// picked / received
    pub success_pct: f64,
}

impl StatusSummary {
    fn from_counts(
        received: usize,
        processed: usize,
        picked: usize,
        expired: usize,
        evicted: usize,
    ) -> Self {
        Self {
            received,
            processed,
            picked,
            expired,
            evicted,
            processed_pct: percent(processed, received),
            delivery_pct: percent(picked, processed),
            expired_pct: percent(expired, processed),
            evicted_pct: percent(evicted, processed),
            success_pct: percent(picked, received),
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(collector: &StatusCollector, id: &str, status: OrderStatus) {
        collector.record(StatusRecorded::new(id, status));
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_and_last_status() {
        let collector = StatusCollector::new();
        record(&collector, "1", OrderStatus::Received);
        record(&collector, "1", OrderStatus::Processed);
        record(&collector, "1", OrderStatus::Expired);

        assert_eq!(collector.last_status("1"), Some(OrderStatus::Expired));
        assert!(collector.is_trashed("1"));
        assert!(!collector.is_evicted("1"));
        assert_eq!(
            collector.history("1"),
            vec![OrderStatus::Received, OrderStatus::Processed, OrderStatus::Expired]
        );
        assert_eq!(collector.last_status("2"), None);
        assert!(collector.history("2").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_counts_orders_once() {
        let collector = StatusCollector::new();
        record(&collector, "1", OrderStatus::Processed);
        assert_eq!(collector.settled(), 0);

        record(&collector, "1", OrderStatus::Evicted);
        record(&collector, "2", OrderStatus::Picked);
        assert_eq!(collector.settled(), 2);
        assert_eq!(collector.count(OrderStatus::Picked), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_activity_moves_on_record() {
        let collector = StatusCollector::new();
        let created = collector.last_activity();

        tokio::time::advance(std::time::Duration::from_secs(3)).await;
        record(&collector, "1", OrderStatus::Received);
        assert_eq!(collector.last_activity() - created, std::time::Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_percentages() {
        let collector = StatusCollector::new();
        for id in ["1", "2", "3", "4"] {
            record(&collector, id, OrderStatus::Received);
            record(&collector, id, OrderStatus::Processed);
        }
        record(&collector, "1", OrderStatus::Picked);
        record(&collector, "2", OrderStatus::Picked);
        record(&collector, "3", OrderStatus::Expired);
        record(&collector, "4", OrderStatus::Evicted);

        let summary = collector.summarize();
        assert_eq!(summary.received, 4);
        assert_eq!(summary.processed_pct, 100.0);
        assert_eq!(summary.delivery_pct, 50.0);
        assert_eq!(summary.expired_pct, 25.0);
        assert_eq!(summary.evicted_pct, 25.0);
        assert_eq!(summary.success_pct, 50.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_summary_has_no_nan() {
        let summary = StatusCollector::new().summarize();
        assert_eq!(summary.processed_pct, 0.0);
        assert_eq!(summary.success_pct, 0.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["delivery_pct"], 0.0);
        assert_eq!(json["received"], 0);
    }
}
