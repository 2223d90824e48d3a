use crate::framework::{EventClient, FrameworkError};
use crate::model::{OrderReadyForStorage, OverflowRequested, ShelfItem, SpaceFreed, Temperature};
use tracing::instrument;

/// Client for the three storage actors: admission, overflow and promotion.
#[derive(Clone)]
pub struct StorageClient {
    admission: EventClient<OrderReadyForStorage>,
    overflow: EventClient<OverflowRequested>,
    promotion: EventClient<SpaceFreed>,
}

impl StorageClient {
    pub fn new(
        admission: EventClient<OrderReadyForStorage>,
        overflow: EventClient<OverflowRequested>,
        promotion: EventClient<SpaceFreed>,
    ) -> Self {
        Self {
            admission,
            overflow,
            promotion,
        }
    }

    /// Hands a prepared (or promoted) item to admission.
    #[instrument(skip(self, item), fields(order_id = %item.id()))]
    pub async fn store(&self, item: ShelfItem) -> Result<(), FrameworkError> {
        self.admission.send(OrderReadyForStorage(item)).await
    }

    /// Redirects an item whose home shelf is full.
    #[instrument(skip(self, item), fields(order_id = %item.id()))]
    pub async fn request_overflow(&self, item: ShelfItem) -> Result<(), FrameworkError> {
        self.overflow.send(OverflowRequested(item)).await
    }

    /// Signals that a home shelf slot was released.
    pub async fn space_freed(&self, temperature: Temperature) -> Result<(), FrameworkError> {
        self.promotion.send(SpaceFreed(temperature)).await
    }
}
