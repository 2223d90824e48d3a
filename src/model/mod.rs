//! Pure data structures flowing through the kitchen.

pub mod error;
pub mod event;
pub mod order;
pub mod shelf_item;
pub mod status;

pub use error::*;
pub use event::*;
pub use order::*;
pub use shelf_item::*;
pub use status::*;
