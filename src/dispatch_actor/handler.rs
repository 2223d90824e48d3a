use crate::dispatch_actor::{log_outcome, pickup, DispatchContext};
use crate::framework::EventHandler;
use crate::model::DispatchRequested;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Sends a courier for every requested order.
///
/// Couriers run as tasks owned by the handler, so waiting for one never
/// delays the next request. Couriers still waiting when the actor stops are
/// aborted.
pub struct DispatchHandler {
    delay: RangeInclusive<Duration>,
    rng: StdRng,
    couriers: JoinSet<()>,
}

impl DispatchHandler {
    pub fn new(delay: RangeInclusive<Duration>, rng: StdRng) -> Self {
        Self {
            delay,
            rng,
            couriers: JoinSet::new(),
        }
    }

    fn next_delay(&mut self) -> Duration {
        self.rng.gen_range(self.delay.clone())
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.couriers.try_join_next() {
            if let Err(e) = result {
                debug!(error = %e, "Courier task failed");
            }
        }
    }
}

#[async_trait]
impl EventHandler for DispatchHandler {
    type Event = DispatchRequested;
    type Context = DispatchContext;

    fn name(&self) -> &'static str {
        "dispatch"
    }

    async fn handle(&mut self, event: DispatchRequested, ctx: &DispatchContext) {
        let DispatchRequested(order) = event;
        self.reap_finished();

        let delay = self.next_delay();
        info!(order_id = %order.id, delay_s = delay.as_secs_f32(), "Courier dispatched");

        let ctx = ctx.clone();
        self.couriers.spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = pickup(&ctx, &order).await;
            log_outcome(&order, &outcome);
        });
    }

    async fn on_stop(&mut self, _ctx: &DispatchContext) {
        let pending = self.couriers.len();
        self.couriers.abort_all();
        while self.couriers.join_next().await.is_some() {}
        if pending > 0 {
            info!(pending, "Couriers recalled");
        }
    }
}
