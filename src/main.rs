//! # Family Grill Simulator
//!
//! Lights the grill, lets the family loose on it for a minute, and prints
//! what survived.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! GRILL_DURATION_SECS=10 GRILL_TIME_SCALE=10 GRILL_SEED=7 RUST_LOG=info cargo run
//! ```
//!
//! Ctrl+C ends the cookout early; the summary is still printed.

use std::sync::Arc;

use grill_sim::events::TracingSink;
use grill_sim::lifecycle::{setup_tracing, GrillSystem, SystemConfig, SystemError};
use grill_sim::model::Roster;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    let config = SystemConfig::from_env()?;
    info!(?config, "Lighting the grill");

    let system = GrillSystem::start(config, Roster::family(), Arc::new(TracingSink));
    let report = system
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    report.log_summary();
    info!("Cookout complete");
    Ok(())
}
