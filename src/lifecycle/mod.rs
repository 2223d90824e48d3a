//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`KitchenSystem`] - builds the registry, wires and spawns every worker, shuts them down
//! - [`KitchenConfig`] - capacities, intervals, delays and the RNG seed
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod config;
pub mod error;
pub mod kitchen_system;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use kitchen_system::*;
pub use self::tracing::*;
