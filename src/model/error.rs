//! Error types for incoming orders.

use crate::framework::FrameworkError;
use crate::shelf::ShelfError;
use thiserror::Error;

/// Errors that reject an order before it enters the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The order is structurally invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// The order's temperature names no shelf.
    #[error(transparent)]
    Shelf(#[from] ShelfError),

    /// The pipeline stopped before the order was handed over.
    #[error("Actor communication error: {0}")]
    ActorCommunication(#[from] FrameworkError),
}
