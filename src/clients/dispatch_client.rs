use crate::framework::{EventClient, FrameworkError};
use crate::model::{DispatchRequested, Order};
use tracing::instrument;

/// Client for the dispatch actor.
#[derive(Clone)]
pub struct DispatchClient {
    inner: EventClient<DispatchRequested>,
}

impl DispatchClient {
    pub fn new(inner: EventClient<DispatchRequested>) -> Self {
        Self { inner }
    }

    /// Sends a courier for `order`.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn dispatch(&self, order: Order) -> Result<(), FrameworkError> {
        self.inner.send(DispatchRequested(order)).await
    }
}
