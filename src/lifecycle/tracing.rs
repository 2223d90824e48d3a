//! # Observability & Tracing
//!
//! The [`setup_tracing`] function installs a compact `tracing_subscriber::fmt`
//! subscriber filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` / `Shutdown` with the handled count, reaper start and stop
//! - **Status Transitions**: every stored, expired, evicted, promoted and picked order, at `info`
//! - **Full Payloads**: each event as it is received, at `debug`
//! - **Rejected Input**: unknown temperatures and invalid orders, at `warn`
//!
//! Every line carries structured fields (`order_id`, `temperature`, `tier`,
//! `size`) rather than formatting them into the message.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Status transitions only
//! RUST_LOG=info cargo run
//!
//! # Every event payload as well
//! RUST_LOG=debug cargo run
//!
//! # Only the storage workers in detail
//! RUST_LOG=info,kitchen_shelves::storage_actor=debug cargo run
//! ```
//!
//! ## Example Output
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Status order_id=a8cfcb76 status=received
//! INFO Stored order_id=a8cfcb76 temperature=frozen budget=12 size=1
//! INFO Courier dispatched order_id=a8cfcb76 delay_s=3.41
//! INFO Picked up order_id=a8cfcb76 name=Banana Split outcome=PickedFromHome
//! INFO Status order_id=a8cfcb76 status=picked
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
