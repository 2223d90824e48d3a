use crate::clients::{StorageClient, SupervisorClient};
use crate::model::{OrderStatus, Temperature};
use crate::shelf::{Shelf, ShelfRegistry, Tier};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What one reaper loop scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapScope {
    /// A single home shelf.
    Home(Temperature),
    /// Every overflow compartment.
    Overflow,
}

/// Periodically removes spoiled items.
///
/// Each scan pops heads while they are expired and stops at the first fresh
/// one. Only home shelves signal [`SpaceFreed`](crate::model::SpaceFreed).
pub struct Reaper {
    scope: ReapScope,
    interval: Duration,
    registry: Arc<ShelfRegistry>,
    storage: StorageClient,
    supervisor: SupervisorClient,
}

impl Reaper {
    pub fn new(
        scope: ReapScope,
        interval: Duration,
        registry: Arc<ShelfRegistry>,
        storage: StorageClient,
        supervisor: SupervisorClient,
    ) -> Self {
        Self {
            scope,
            interval,
            registry,
            storage,
            supervisor,
        }
    }

    /// A scan in progress always finishes before shutdown is observed.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(scope = ?self.scope, "Reaper started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut reaped = 0;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => reaped += self.sweep().await,
            }
        }
        info!(scope = ?self.scope, reaped, "Reaper stopped");
    }

    /// One scan over the scope; returns how many items expired.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut reaped = 0;
        match self.scope {
            ReapScope::Home(temperature) => {
                reaped += self.sweep_shelf(self.registry.home(temperature), now).await;
            }
            ReapScope::Overflow => {
                for shelf in self.registry.overflows() {
                    reaped += self.sweep_shelf(shelf, now).await;
                }
            }
        }
        reaped
    }

    async fn sweep_shelf(&self, shelf: &Shelf, now: Instant) -> usize {
        let mut reaped = 0;
        // Err is an empty shelf.
        while let Ok(Some(item)) = shelf.pop_if(|head| head.is_expired(now)) {
            reaped += 1;
            info!(
                order_id = %item.id(),
                temperature = %shelf.temperature(),
                tier = %shelf.tier(),
                "Expired"
            );
            let _ = self.supervisor.report(item.id(), OrderStatus::Expired).await;
            if shelf.tier() == Tier::Home {
                let _ = self.storage.space_freed(shelf.temperature()).await;
            }
        }
        if reaped > 0 {
            debug!(temperature = %shelf.temperature(), tier = %shelf.tier(), reaped, "Sweep");
        }
        reaped
    }
}
