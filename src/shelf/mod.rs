//! Bounded, decaying shelves.
//!
//! - [`FreshnessQueue`] - arena-backed min-heap with an id index
//! - [`Shelf`] - one lock domain around a queue
//! - [`ShelfRegistry`] - the home shelves and overflow compartments
//! - [`ShelfError`] - shelf-level failures

pub mod bounded;
pub mod error;
pub mod queue;
pub mod registry;

pub use bounded::*;
pub use error::*;
pub use queue::*;
pub use registry::*;
