//! The five event kinds exchanged between the kitchen's actors.
//!
//! Each kind travels over its own channel to exactly one consumer:
//!
//! - [`OrderReadyForStorage`] → storage admission
//! - [`OverflowRequested`] → overflow handling
//! - [`SpaceFreed`] → promotion
//! - [`StatusRecorded`] → supervisor
//! - [`DispatchRequested`] → dispatch

use crate::model::{Order, OrderStatus, ShelfItem, Temperature};

/// A prepared item (or a promoted one) to be placed on its home shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReadyForStorage(pub ShelfItem);

/// An item whose home shelf was full.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowRequested(pub ShelfItem);

/// A home shelf slot was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceFreed(pub Temperature);

/// A status transition for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecorded {
    pub order_id: String,
    pub status: OrderStatus,
}

impl StatusRecorded {
    pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            status,
        }
    }
}

/// An order a courier should collect.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequested(pub Order);
