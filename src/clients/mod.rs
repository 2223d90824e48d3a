//! Type-safe wrappers around [`EventClient`](crate::framework::EventClient).
//!
//! Handlers never touch raw channels; they publish through these clients so
//! each send site reads as a domain operation (`store`, `report`, `dispatch`).

pub mod dispatch_client;
pub mod storage_client;
pub mod supervisor_client;

pub use dispatch_client::*;
pub use storage_client::*;
pub use supervisor_client::*;
