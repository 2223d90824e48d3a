use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A step in an order's lifecycle, as reported to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Processed,
    Picked,
    Expired,
    Evicted,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::Processed,
        OrderStatus::Picked,
        OrderStatus::Expired,
        OrderStatus::Evicted,
    ];

    /// Picked, expired and evicted end an order's life; each order gets exactly one.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Picked | OrderStatus::Expired | OrderStatus::Evicted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Processed => "processed",
            OrderStatus::Picked => "picked",
            OrderStatus::Expired => "expired",
            OrderStatus::Evicted => "evicted",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
