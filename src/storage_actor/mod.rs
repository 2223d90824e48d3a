//! # Storage Service
//!
//! Four workers share one [`ShelfRegistry`]:
//!
//! - [`AdmissionHandler`] places ready items on their home shelf, or hands
//!   them to overflow when the shelf is full.
//! - [`OverflowHandler`] re-budgets items for the overflow tier, evicting a
//!   random resident when the tier is at its cap.
//! - [`PromotionHandler`] moves an overflow item back home when a home slot
//!   frees up.
//! - [`Reaper`] removes spoiled items, one loop per home shelf plus one for
//!   the whole overflow tier.
//!
//! Sends only flow promotion → admission → overflow → supervisor, so no
//! bounded channel can wait on itself.

pub mod admission;
pub mod overflow;
pub mod promotion;
pub mod reaper;

pub use admission::*;
pub use overflow::*;
pub use promotion::*;
pub use reaper::*;

use crate::clients::{StorageClient, SupervisorClient};
use crate::framework::EventActor;
use crate::shelf::ShelfRegistry;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Dependencies injected into every storage worker at `run()` time.
#[derive(Clone)]
pub struct StorageContext {
    pub registry: Arc<ShelfRegistry>,
    pub storage: StorageClient,
    pub supervisor: SupervisorClient,
}

/// The three event-driven storage actors, created but not yet running.
pub struct StorageActors {
    pub admission: EventActor<AdmissionHandler>,
    pub overflow: EventActor<OverflowHandler>,
    pub promotion: EventActor<PromotionHandler>,
}

/// Creates the storage actors and the client that feeds all three.
///
/// `rng` drives overflow eviction; seed it for reproducible runs.
pub fn new(buffer_size: usize, rng: StdRng) -> (StorageActors, StorageClient) {
    let (admission, admission_client) = EventActor::new(buffer_size, AdmissionHandler);
    let (overflow, overflow_client) = EventActor::new(buffer_size, OverflowHandler::new(rng));
    let (promotion, promotion_client) = EventActor::new(buffer_size, PromotionHandler);

    let client = StorageClient::new(admission_client, overflow_client, promotion_client);
    (
        StorageActors {
            admission,
            overflow,
            promotion,
        },
        client,
    )
}
