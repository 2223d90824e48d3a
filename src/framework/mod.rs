//! Generic event-actor framework.
//!
//! This module provides the building blocks every worker in the kitchen is made of:
//! one bounded channel per event kind, one consumer task per channel.
//!
//! # Main Components
//!
//! - [`EventHandler`] - Trait that a worker implements to consume one event kind
//! - [`EventActor`] - Generic actor that owns the receiver and runs the loop
//! - [`EventClient`] - Typed, cloneable sender for an event kind
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to capture events without spawning real consumers.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
