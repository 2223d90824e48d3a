//! Error types for shelf operations.

use thiserror::Error;

/// Errors that can occur during shelf operations.
///
/// `EmptyShelf` and `NotFound` are expected under normal operation (an empty
/// reaper scan, a courier losing the race to the reaper) and callers branch
/// on them. `DuplicateId` means an upstream invariant broke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShelfError {
    /// Pop, peek or random selection on an empty shelf.
    #[error("Shelf is empty")]
    EmptyShelf,

    /// The order is not on this shelf.
    #[error("Order not on shelf: {0}")]
    NotFound(String),

    /// The temperature names no shelf.
    #[error("Unknown temperature: '{0}'")]
    UnknownTemperature(String),

    /// An order with this id is already on the shelf.
    #[error("Duplicate order id: {0}")]
    DuplicateId(String),
}
