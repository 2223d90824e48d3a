//! Courier simulation.
//!
//! The dispatch actor spawns one courier task per [`DispatchRequested`](crate::model::DispatchRequested)
//! event. Each courier sleeps a random delay, then runs [`pickup`].

pub mod courier;
pub mod handler;

pub use courier::*;
pub use handler::*;

use crate::clients::{DispatchClient, StorageClient, SupervisorClient};
use crate::framework::EventActor;
use crate::shelf::ShelfRegistry;
use rand::rngs::StdRng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

/// Dependencies injected into the dispatch actor and cloned into each courier.
#[derive(Clone)]
pub struct DispatchContext {
    pub registry: Arc<ShelfRegistry>,
    pub storage: StorageClient,
    pub supervisor: SupervisorClient,
}

/// Creates the dispatch actor and its client.
pub fn new(
    buffer_size: usize,
    delay: RangeInclusive<Duration>,
    rng: StdRng,
) -> (EventActor<DispatchHandler>, DispatchClient) {
    let (actor, inner) = EventActor::new(buffer_size, DispatchHandler::new(delay, rng));
    (actor, DispatchClient::new(inner))
}
