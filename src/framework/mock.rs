//! # Mock Framework & Testing Guide
//!
//! The [`EventProbe<E>`] type stands in for a real consumer actor. Hand its
//! [`EventClient`] to the handler under test, feed the handler synthetic events,
//! then assert on what it published.
//!
//! ## When to use Probes vs Real Actors
//!
//! | Feature | EventProbe | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | Events observed in send order | Subject to scheduler |
//! | **Downstream effects** | None | Full pipeline |
//! | **Use Case** | Testing one handler in isolation | Testing the whole kitchen |
//!
//! ## Pattern: Handler with Probed Dependencies
//!
//! ```rust
//! use kitchen_shelves::framework::mock::EventProbe;
//! use kitchen_shelves::model::{SpaceFreed, Temperature};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut probe) = EventProbe::<SpaceFreed>::new(8);
//!
//!     // Normally the client is wired into a handler context.
//!     client.send(SpaceFreed(Temperature::Hot)).await.unwrap();
//!
//!     assert_eq!(probe.next().await, Some(SpaceFreed(Temperature::Hot)));
//!     probe.assert_empty();
//! }
//! ```
//!
//! See `tests/storage_actor_test.rs` for the full pattern.

use crate::framework::EventClient;
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long [`EventProbe::next`] waits before giving up.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Captures the events published on one channel.
pub struct EventProbe<E> {
    receiver: mpsc::Receiver<E>,
}

impl<E: Send + Debug + 'static> EventProbe<E> {
    /// Creates a client and the probe that observes it.
    pub fn new(buffer_size: usize) -> (EventClient<E>, Self) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (EventClient::new(sender), Self { receiver })
    }

    /// Waits up to [`PROBE_TIMEOUT`] for the next event.
    pub async fn next(&mut self) -> Option<E> {
        tokio::time::timeout(PROBE_TIMEOUT, self.receiver.recv())
            .await
            .ok()
            .flatten()
    }

    /// Returns the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Returns every event queued so far.
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Panics if anything was published that the test did not consume.
    pub fn assert_empty(&mut self) {
        let leftover = self.drain();
        if !leftover.is_empty() {
            panic!("Unexpected events: {:?}", leftover);
        }
    }

    /// Closes the channel; later sends from the client fail with `ActorClosed`.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
