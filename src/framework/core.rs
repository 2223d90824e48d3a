//! # Core Event Framework
//!
//! This module defines the generic building blocks for the kitchen's event pipeline.
//!
//! ## Key Types
//!
//! - [`EventHandler`]: The trait that all workers must implement.
//! - [`EventActor`]: The generic actor that drains one event channel.
//! - [`EventClient`]: The generic client for publishing events to an actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed).

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks and Context)
// =============================================================================

/// Trait that any worker must implement to be driven by [`EventActor`].
///
/// # Architecture Note
/// Storage admission, overflow handling, promotion, dispatch and the supervisor
/// all follow the same shape: wait for the next event, act on shared shelf state,
/// publish follow-up events. Writing that loop once in [`EventActor`] keeps each
/// handler down to its business logic.
///
/// # Async & Context
/// The `Context` type is injected into every hook at `run()` time, not at
/// construction time. Handlers that publish to each other (promotion feeds
/// admission, admission feeds overflow) can therefore all be built before any
/// of them is wired.
///
/// Handlers have no error channel: the pipeline only knows terminal status
/// events, so failures are handled (and logged) inside `handle`.
#[async_trait]
pub trait EventHandler: Send + 'static {
    /// The event kind this handler consumes.
    type Event: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Called once before the first event is received.
    async fn on_start(&mut self, _ctx: &Self::Context) {}

    /// Handle a single event. Runs to completion before the next event is received.
    async fn handle(&mut self, event: Self::Event, ctx: &Self::Context);

    /// Called once after the loop exits, whether by shutdown or channel closure.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}

// =============================================================================
// 2. THE ERRORS
// =============================================================================

/// Errors that can occur within the event framework itself.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
}

// =============================================================================
// 3. THE GENERIC ACTOR
// =============================================================================

/// The generic actor that drains one event channel into one handler.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the handler and the
/// receiver end of the channel; the handler's own fields (RNG, courier tasks)
/// therefore need no locking. Shelf state is shared between actors and carries
/// its own per-shelf locks.
///
/// **Shutdown**:
/// The kitchen's actors hold clients of one another, so dropping the outside
/// clients never closes every channel. The loop therefore also stops when the
/// shared [`CancellationToken`] fires. An event already being handled is
/// finished first.
pub struct EventActor<H: EventHandler> {
    receiver: mpsc::Receiver<H::Event>,
    handler: H,
}

impl<H: EventHandler> EventActor<H> {
    /// Creates a new `EventActor` and the `EventClient` that feeds it.
    ///
    /// `buffer_size` is the capacity of the channel. When it is full, senders
    /// wait until the actor catches up.
    pub fn new(buffer_size: usize, handler: H) -> (Self, EventClient<H::Event>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, handler };
        (actor, EventClient::new(sender))
    }

    /// Runs the actor's event loop until the channel closes or `shutdown` is cancelled.
    pub async fn run(mut self, context: H::Context, shutdown: CancellationToken) {
        let actor = self.handler.name();
        info!(actor, "Actor started");
        self.handler.on_start(&context).await;

        let mut handled: u64 = 0;
        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = self.receiver.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };
            debug!(actor, ?event, "Event");
            self.handler.handle(event, &context).await;
            handled += 1;
        }

        self.handler.on_stop(&context).await;
        info!(actor, handled, "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe publisher for one event kind. Cheap to clone.
pub struct EventClient<E> {
    sender: mpsc::Sender<E>,
}

impl<E> Clone for EventClient<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E: Send + Debug + 'static> EventClient<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    /// Publishes an event, waiting for channel capacity if needed.
    ///
    /// Fails only once the consumer has stopped; the undelivered event is
    /// logged at debug level.
    pub async fn send(&self, event: E) -> Result<(), FrameworkError> {
        self.sender.send(event).await.map_err(|e| {
            debug!(event = ?e.0, "Receiver stopped, event dropped");
            FrameworkError::ActorClosed
        })
    }

    /// Returns true once the consuming actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Add(u64);

    struct Summer {
        stopped: Arc<AtomicU64>,
    }

    #[async_trait]
    impl EventHandler for Summer {
        type Event = Add;
        type Context = Arc<AtomicU64>;

        fn name(&self) -> &'static str {
            "summer"
        }

        async fn handle(&mut self, event: Add, total: &Arc<AtomicU64>) {
            total.fetch_add(event.0, Ordering::SeqCst);
        }

        async fn on_stop(&mut self, _total: &Arc<AtomicU64>) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_actor_stops_when_clients_dropped() {
        let total = Arc::new(AtomicU64::new(0));
        let stopped = Arc::new(AtomicU64::new(0));
        let (actor, client) = EventActor::new(4, Summer { stopped: stopped.clone() });
        let handle = tokio::spawn(actor.run(total.clone(), CancellationToken::new()));

        for n in 1..=4 {
            client.send(Add(n)).await.unwrap();
        }
        drop(client);
        handle.await.unwrap();

        assert_eq!(total.load(Ordering::SeqCst), 10);
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_actor_stops_on_shutdown_and_rejects_sends() {
        let stopped = Arc::new(AtomicU64::new(0));
        let (actor, client) = EventActor::new(4, Summer { stopped: stopped.clone() });
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(actor.run(Arc::new(AtomicU64::new(0)), shutdown.clone()));

        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(stopped.load(Ordering::SeqCst), 1);
        assert!(client.is_closed());
        assert_eq!(client.send(Add(1)).await, Err(FrameworkError::ActorClosed));
    }
}
