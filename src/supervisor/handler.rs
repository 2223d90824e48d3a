use crate::framework::EventHandler;
use crate::model::StatusRecorded;
use crate::supervisor::StatusCollector;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Consumes [`StatusRecorded`] events into the shared collector.
pub struct SupervisorHandler;

#[async_trait]
impl EventHandler for SupervisorHandler {
    type Event = StatusRecorded;
    type Context = Arc<StatusCollector>;

    fn name(&self) -> &'static str {
        "supervisor"
    }

    async fn handle(&mut self, event: StatusRecorded, collector: &Arc<StatusCollector>) {
        info!(order_id = %event.order_id, status = %event.status, "Status");
        collector.record(event);
    }

    async fn on_stop(&mut self, collector: &Arc<StatusCollector>) {
        info!(settled = collector.settled(), "Final status");
    }
}
