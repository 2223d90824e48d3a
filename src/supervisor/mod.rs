//! Order status supervision.
//!
//! - [`StatusCollector`] - the queryable status ledger
//! - [`SupervisorHandler`] - actor that feeds the ledger from [`StatusRecorded`](crate::model::StatusRecorded) events
//! - [`IdleWatchdog`] - logs when no status arrives for a while

pub mod collector;
pub mod handler;
pub mod watchdog;

pub use collector::*;
pub use handler::*;
pub use watchdog::*;

use crate::clients::SupervisorClient;
use crate::framework::EventActor;
use std::sync::Arc;

/// Creates the supervisor actor and its client, both bound to `collector`.
pub fn new(
    buffer_size: usize,
    collector: Arc<StatusCollector>,
) -> (EventActor<SupervisorHandler>, SupervisorClient) {
    let (actor, inner) = EventActor::new(buffer_size, SupervisorHandler);
    (actor, SupervisorClient::new(inner, collector))
}
