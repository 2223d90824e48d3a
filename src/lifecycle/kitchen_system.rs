use crate::clients::{DispatchClient, StorageClient, SupervisorClient};
use crate::dispatch_actor::DispatchContext;
use crate::kitchen::prepare;
use crate::lifecycle::{KitchenConfig, SystemError};
use crate::model::{Order, OrderError, OrderStatus, Temperature};
use crate::shelf::ShelfRegistry;
use crate::storage_actor::{ReapScope, Reaper, StorageContext};
use crate::supervisor::{IdleWatchdog, StatusCollector, StatusSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// How often [`KitchenSystem::wait_until_settled`] polls the collector.
const SETTLE_POLL: Duration = Duration::from_millis(100);

/// The runtime orchestrator for the kitchen.
///
/// `KitchenSystem` is responsible for:
/// - **Dependency Wiring**: one [`ShelfRegistry`] and one [`StatusCollector`]
///   shared by every worker, and the clients each worker publishes through
/// - **Lifecycle Management**: spawning the actors, the reapers and the idle
///   watchdog, and stopping them all together
/// - **Order Intake**: the kitchen step that turns a received order into a
///   ready shelf item and calls a courier for it
///
/// # Architecture
///
/// Five actors, one per event kind:
/// - **Admission**, **Overflow**, **Promotion**: the storage service
/// - **Dispatch**: spawns one courier task per order
/// - **Supervisor**: records every status transition
///
/// Plus four reaper loops (one per home shelf, one for the overflow tier) and
/// the idle watchdog.
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(KitchenConfig::default())?;
///
/// system.submit(Order::new("1", "Banana Split", "frozen", 20, 0.63)).await?;
/// system.wait_until_settled(1, Duration::from_secs(30)).await;
///
/// println!("{:?}", system.summarize());
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    pub storage_client: StorageClient,
    pub dispatch_client: DispatchClient,
    pub supervisor_client: SupervisorClient,

    registry: Arc<ShelfRegistry>,
    collector: Arc<StatusCollector>,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl KitchenSystem {
    /// Validates `config`, then creates and starts every worker.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn new(config: KitchenConfig) -> Result<Self, SystemError> {
        config.validate()?;

        let (eviction_rng, courier_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let registry = Arc::new(ShelfRegistry::new(&config.shelves));
        let collector = Arc::new(StatusCollector::new());
        let shutdown = CancellationToken::new();
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies)
        let (supervisor_actor, supervisor_client) =
            crate::supervisor::new(buffer, collector.clone());
        let (storage_actors, storage_client) = crate::storage_actor::new(buffer, eviction_rng);
        let (dispatch_actor, dispatch_client) =
            crate::dispatch_actor::new(buffer, config.courier_delay(), courier_rng);

        // 2. Start actors with injected context
        let storage_ctx = StorageContext {
            registry: registry.clone(),
            storage: storage_client.clone(),
            supervisor: supervisor_client.clone(),
        };
        let dispatch_ctx = DispatchContext {
            registry: registry.clone(),
            storage: storage_client.clone(),
            supervisor: supervisor_client.clone(),
        };

        let mut handles = vec![
            tokio::spawn(supervisor_actor.run(collector.clone(), shutdown.clone())),
            tokio::spawn(
                storage_actors
                    .admission
                    .run(storage_ctx.clone(), shutdown.clone()),
            ),
            tokio::spawn(
                storage_actors
                    .overflow
                    .run(storage_ctx.clone(), shutdown.clone()),
            ),
            tokio::spawn(storage_actors.promotion.run(storage_ctx, shutdown.clone())),
            tokio::spawn(dispatch_actor.run(dispatch_ctx, shutdown.clone())),
        ];

        // 3. Background loops
        let scopes = Temperature::ALL
            .into_iter()
            .map(ReapScope::Home)
            .chain([ReapScope::Overflow]);
        for scope in scopes {
            let reaper = Reaper::new(
                scope,
                config.reap_interval,
                registry.clone(),
                storage_client.clone(),
                supervisor_client.clone(),
            );
            handles.push(tokio::spawn(reaper.run(shutdown.clone())));
        }

        let watchdog = IdleWatchdog::new(collector.clone(), config.idle_report_after);
        handles.push(tokio::spawn(watchdog.run(shutdown.clone())));

        info!(workers = handles.len(), "Kitchen started");
        Ok(Self {
            storage_client,
            dispatch_client,
            supervisor_client,
            registry,
            collector,
            shutdown,
            handles,
        })
    }

    pub fn registry(&self) -> &Arc<ShelfRegistry> {
        &self.registry
    }

    pub fn collector(&self) -> &Arc<StatusCollector> {
        &self.collector
    }

    pub fn summarize(&self) -> StatusSummary {
        self.collector.summarize()
    }

    /// Receives, prepares and stores one order, and sends a courier for it.
    ///
    /// Invalid orders are rejected before any status is recorded.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn submit(&self, order: Order) -> Result<(), OrderError> {
        order.validate()?;

        self.supervisor_client
            .report(&order.id, OrderStatus::Received)
            .await?;
        let item = prepare(order.clone(), Instant::now());
        self.supervisor_client
            .report(&order.id, OrderStatus::Processed)
            .await?;

        self.storage_client.store(item).await?;
        self.dispatch_client.dispatch(order).await?;
        Ok(())
    }

    /// Submits every order in turn, skipping invalid ones.
    ///
    /// Returns how many were accepted. Stops early only if the pipeline is
    /// down.
    pub async fn submit_batch<I>(&self, orders: I) -> Result<usize, OrderError>
    where
        I: IntoIterator<Item = Order>,
    {
        let mut accepted = 0;
        for order in orders {
            let id = order.id.clone();
            match self.submit(order).await {
                Ok(()) => accepted += 1,
                Err(OrderError::ActorCommunication(e)) => return Err(e.into()),
                Err(e) => warn!(order_id = %id, error = %e, "Order rejected"),
            }
        }
        Ok(accepted)
    }

    /// Waits until `expected` orders have reached a terminal status.
    ///
    /// Returns false if `timeout` elapsed first.
    pub async fn wait_until_settled(&self, expected: usize, timeout: Duration) -> bool {
        let settled = async {
            while self.collector.settled() < expected {
                tokio::time::sleep(SETTLE_POLL).await;
            }
        };
        tokio::time::timeout(timeout, settled).await.is_ok()
    }

    /// Gracefully shuts down every worker.
    ///
    /// This method:
    /// 1. Cancels the shared shutdown token
    /// 2. Waits for every task to finish its current event or scan
    /// 3. Returns an error if any task panicked
    ///
    /// Couriers still on their way are recalled by the dispatch actor.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down kitchen...");
        self.shutdown.cancel();

        drop(self.storage_client);
        drop(self.dispatch_client);
        drop(self.supervisor_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Worker task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("Kitchen shutdown complete.");
        Ok(())
    }
}
