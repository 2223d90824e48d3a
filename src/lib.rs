//! # Kitchen Shelves
//!
//! > **Bounded, decaying, eviction-aware shelf storage driven by Tokio actors.**
//!
//! A shared kitchen prepares orders, parks them on temperature-specific
//! shelves that lose freshness over time, and sends couriers to collect them.
//! Every order ends picked up, expired or evicted.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One Channel per Event Kind
//! Each of the five events (`OrderReadyForStorage`, `OverflowRequested`,
//! `SpaceFreed`, `StatusRecorded`, `DispatchRequested`) has its own bounded
//! channel and exactly one consumer. There is no central dispatch loop, and
//! every handler can be tested alone by feeding it synthetic events.
//!
//! ### One Lock per Shelf
//! Shelves are shared state, but each one is its own lock domain. HOT and COLD
//! never contend; a reaper and a courier only serialize when they touch the
//! same shelf. No lock is ever held across an `.await`.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each concern defines its own error type (`ShelfError`, `OrderError`,
//! `ConfigError`, `SystemError`). Shelf errors never leave the worker that hit
//! them: the pipeline only has terminal status events, not failed orders.
//!
//! ### 2. Async Context Injection
//! Dependencies are injected at `run()` time, not at construction time, so
//! workers that publish to each other can all be created first and wired after.
//!
//! ### 3. Shutdown
//! The actors hold clients of each other, so closing channels can't stop them.
//! A shared `CancellationToken` does.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See the [`lifecycle::tracing`]
//! module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`EventActor`](framework::EventActor) loop and the
//! [`EventHandler`](framework::EventHandler) trait every worker implements.
//!
//! ### 2. The Store ([`shelf`], [`decay`])
//! [`Shelf`](shelf::Shelf) wraps an arena-backed min-heap with an id index;
//! [`ShelfRegistry`](shelf::ShelfRegistry) owns the home shelves and overflow
//! compartments.
//!
//! ### 3. The Workers ([`storage_actor`], [`dispatch_actor`], [`supervisor`])
//! Admission, overflow, promotion and reaping; couriers; status collection.
//!
//! ### 4. The Interface ([`clients`])
//! Domain-specific wrappers around the raw event clients.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`KitchenSystem`](lifecycle::KitchenSystem) spins everything up, takes
//! orders and shuts everything down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod decay;
pub mod dispatch_actor;
pub mod framework;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod shelf;
pub mod storage_actor;
pub mod supervisor;
