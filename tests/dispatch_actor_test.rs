use kitchen_shelves::clients::{StorageClient, SupervisorClient};
use kitchen_shelves::dispatch_actor::{pickup, DispatchContext, PickupOutcome};
use kitchen_shelves::framework::mock::EventProbe;
use kitchen_shelves::kitchen::prepare;
use kitchen_shelves::model::{
    Order, OrderReadyForStorage, OrderStatus, OverflowRequested, SpaceFreed, StatusRecorded,
    Temperature,
};
use kitchen_shelves::shelf::{ShelfCapacities, ShelfRegistry};
use kitchen_shelves::supervisor::StatusCollector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Dispatch context with probed storage and supervisor channels.
///
/// Pattern 2: the real courier logic against a real registry, with every
/// outgoing event captured.
struct Harness {
    ctx: DispatchContext,
    collector: Arc<StatusCollector>,
    promotion: EventProbe<SpaceFreed>,
    status: EventProbe<StatusRecorded>,
    // Held so the storage client's other channels stay open.
    _admission: EventProbe<OrderReadyForStorage>,
    _overflow: EventProbe<OverflowRequested>,
}

impl Harness {
    fn new() -> Self {
        let (admission_client, _admission) = EventProbe::new(8);
        let (overflow_client, _overflow) = EventProbe::new(8);
        let (promotion_client, promotion) = EventProbe::new(8);
        let (status_client, status) = EventProbe::new(8);
        let collector = Arc::new(StatusCollector::new());

        let ctx = DispatchContext {
            registry: Arc::new(ShelfRegistry::new(&ShelfCapacities::default())),
            storage: StorageClient::new(admission_client, overflow_client, promotion_client),
            supervisor: SupervisorClient::new(status_client, collector.clone()),
        };
        Self {
            ctx,
            collector,
            promotion,
            status,
            _admission,
            _overflow,
        }
    }

    fn shelve(&self, order: &Order, temperature: Temperature, overflow: bool) {
        let item = prepare(order.clone(), Instant::now());
        let shelf = if overflow {
            self.ctx.registry.overflow(temperature)
        } else {
            self.ctx.registry.home(temperature)
        };
        shelf.push(item).unwrap();
    }
}

fn order(id: &str, temp: &str) -> Order {
    Order::new(id, "Dish", temp, 120, 0.2)
}

#[tokio::test(start_paused = true)]
async fn test_pickup_from_home_frees_space() {
    let mut h = Harness::new();
    let order = order("1", "hot");
    h.shelve(&order, Temperature::Hot, false);

    assert_eq!(pickup(&h.ctx, &order).await, PickupOutcome::PickedFromHome);

    assert!(!h.ctx.registry.home(Temperature::Hot).is_present("1"));
    assert_eq!(
        h.status.try_next(),
        Some(StatusRecorded::new("1", OrderStatus::Picked))
    );
    assert_eq!(h.promotion.try_next(), Some(SpaceFreed(Temperature::Hot)));
    h.status.assert_empty();
}

#[tokio::test(start_paused = true)]
async fn test_pickup_from_overflow_does_not_free_space() {
    let mut h = Harness::new();
    let order = order("2", "cold");
    h.shelve(&order, Temperature::Cold, true);

    assert_eq!(pickup(&h.ctx, &order).await, PickupOutcome::PickedFromOverflow);

    assert_eq!(h.ctx.registry.overflow_len(), 0);
    assert_eq!(
        h.status.try_next(),
        Some(StatusRecorded::new("2", OrderStatus::Picked))
    );
    h.promotion.assert_empty();
}

#[tokio::test(start_paused = true)]
async fn test_missing_order_is_classified_from_last_status() {
    let mut h = Harness::new();
    h.collector
        .record(StatusRecorded::new("expired", OrderStatus::Processed));
    h.collector
        .record(StatusRecorded::new("expired", OrderStatus::Expired));
    h.collector
        .record(StatusRecorded::new("evicted", OrderStatus::Evicted));
    h.collector
        .record(StatusRecorded::new("in-transit", OrderStatus::Processed));

    assert_eq!(
        pickup(&h.ctx, &order("expired", "frozen")).await,
        PickupOutcome::AlreadyExpired
    );
    assert_eq!(
        pickup(&h.ctx, &order("evicted", "frozen")).await,
        PickupOutcome::AlreadyEvicted
    );
    assert_eq!(
        pickup(&h.ctx, &order("in-transit", "frozen")).await,
        PickupOutcome::Missing(Some(OrderStatus::Processed))
    );
    assert_eq!(
        pickup(&h.ctx, &order("unknown", "frozen")).await,
        PickupOutcome::Missing(None)
    );

    h.status.assert_empty();
    h.promotion.assert_empty();
}

#[tokio::test(start_paused = true)]
async fn test_unknown_temperature_is_abandoned() {
    let mut h = Harness::new();
    assert_eq!(
        pickup(&h.ctx, &order("x", "ambient")).await,
        PickupOutcome::Rejected
    );
    h.status.assert_empty();
}

#[tokio::test(start_paused = true)]
async fn test_courier_loses_race_to_reaper() {
    let mut h = Harness::new();
    let order = order("3", "hot");
    h.shelve(&order, Temperature::Hot, false);

    // The reaper got there first.
    h.ctx.registry.home(Temperature::Hot).delete("3").unwrap();
    h.collector
        .record(StatusRecorded::new("3", OrderStatus::Expired));

    assert_eq!(pickup(&h.ctx, &order).await, PickupOutcome::AlreadyExpired);
    h.status.assert_empty();
    h.promotion.assert_empty();
}

/// Pattern 2 with a spawned actor: the courier waits its delay, then picks.
#[tokio::test(start_paused = true)]
async fn test_dispatch_actor_picks_after_delay() {
    let mut h = Harness::new();
    let order = order("4", "frozen");
    h.shelve(&order, Temperature::Frozen, false);

    let delay = Duration::from_secs(2);
    let (actor, client) = kitchen_shelves::dispatch_actor::new(8, delay..=delay, StdRng::seed_from_u64(5));
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(actor.run(h.ctx.clone(), shutdown.clone()));

    client.dispatch(order).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(h.ctx.registry.home(Temperature::Frozen).is_present("4"));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!h.ctx.registry.home(Temperature::Frozen).is_present("4"));
    assert_eq!(
        h.status.try_next(),
        Some(StatusRecorded::new("4", OrderStatus::Picked))
    );
    assert_eq!(h.promotion.try_next(), Some(SpaceFreed(Temperature::Frozen)));

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pending_couriers_are_recalled_on_shutdown() {
    let mut h = Harness::new();
    let order = order("5", "cold");
    h.shelve(&order, Temperature::Cold, false);

    let delay = Duration::from_secs(10);
    let (actor, client) = kitchen_shelves::dispatch_actor::new(8, delay..=delay, StdRng::seed_from_u64(5));
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(actor.run(h.ctx.clone(), shutdown.clone()));

    client.dispatch(order).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    shutdown.cancel();
    handle.await.unwrap();
    tokio::time::sleep(Duration::from_secs(20)).await;

    assert!(h.ctx.registry.home(Temperature::Cold).is_present("5"));
    h.status.assert_empty();
    h.promotion.assert_empty();
}
