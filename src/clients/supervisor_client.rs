use crate::framework::{EventClient, FrameworkError};
use crate::model::{OrderStatus, StatusRecorded};
use crate::supervisor::StatusCollector;
use std::sync::Arc;

/// Client for the supervisor.
///
/// Status transitions go through the supervisor actor; reads go straight to
/// the shared [`StatusCollector`], which is safe to query from any task.
#[derive(Clone)]
pub struct SupervisorClient {
    inner: EventClient<StatusRecorded>,
    collector: Arc<StatusCollector>,
}

impl SupervisorClient {
    pub fn new(inner: EventClient<StatusRecorded>, collector: Arc<StatusCollector>) -> Self {
        Self { inner, collector }
    }

    /// Reports a status transition for one order.
    pub async fn report(
        &self,
        order_id: impl Into<String>,
        status: OrderStatus,
    ) -> Result<(), FrameworkError> {
        self.inner.send(StatusRecorded::new(order_id, status)).await
    }

    pub fn last_status(&self, order_id: &str) -> Option<OrderStatus> {
        self.collector.last_status(order_id)
    }
}
