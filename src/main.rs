//! Demo run over a small built-in order batch.

use kitchen_shelves::lifecycle::{setup_tracing, KitchenConfig, KitchenSystem};
use kitchen_shelves::model::Order;
use std::time::Duration;
use tracing::{info, Instrument};

const ORDERS: &str = r#"[
  {"id": "a8cfcb76", "name": "Banana Split", "temp": "frozen", "shelfLife": 20, "decayRate": 0.63},
  {"id": "58e9b5fe", "name": "McFlury", "temp": "frozen", "shelfLife": 375, "decayRate": 0.4},
  {"id": "2ec069e3", "name": "Acai Bowl", "temp": "cold", "shelfLife": 249, "decayRate": 0.3},
  {"id": "690b85f7", "name": "Yogurt", "temp": "cold", "shelfLife": 263, "decayRate": 0.37},
  {"id": "972aa5b8", "name": "Pad See Ew", "temp": "hot", "shelfLife": 210, "decayRate": 0.72},
  {"id": "c18e1242", "name": "Cheese Pizza", "temp": "hot", "shelfLife": 3, "decayRate": 0.3},
  {"id": "5df5d094", "name": "Kale Salad", "temp": "cold", "shelfLife": 0, "decayRate": 0.5},
  {"id": "8d2ac2ba", "name": "Chicken Nuggets", "temp": "hot", "shelfLife": 28, "decayRate": 0.73},
  {"id": "b7ee9e3e", "name": "Mystery Meat", "temp": "lukewarm", "shelfLife": 30, "decayRate": 0.1}
]"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let orders: Vec<Order> = serde_json::from_str(ORDERS)?;
    let config = KitchenConfig {
        shelves: kitchen_shelves::shelf::ShelfCapacities {
            hot: 1,
            cold: 1,
            frozen: 1,
            overflow: 2,
        },
        ..KitchenConfig::default()
    };

    info!(orders = orders.len(), "Starting kitchen");
    let system = KitchenSystem::new(config)?;

    let span = tracing::info_span!("order_intake");
    let accepted = system.submit_batch(orders).instrument(span).await?;
    info!(accepted, "Orders submitted");

    if !system.wait_until_settled(accepted, Duration::from_secs(30)).await {
        info!(settled = system.collector().settled(), "Timed out waiting for orders");
    }

    let summary = system.summarize();
    info!(report = %serde_json::to_string_pretty(&summary)?, "Order status report");

    system.shutdown().await?;
    info!("Kitchen closed");
    Ok(())
}
