//! # Run Lifecycle & Orchestration
//!
//! Everything around the core: lighting the grill, starting the family,
//! ending the cookout, and reporting what happened.
//!
//! ## The GrillSystem Pattern
//!
//! [`GrillSystem`] is the coordinator:
//!
//! ```rust,ignore
//! let config = SystemConfig::from_env()?;
//! let system = GrillSystem::start(config, Roster::family(), Arc::new(TracingSink));
//! let report = system.run_until(tokio::signal::ctrl_c()).await;
//! report.log_summary();
//! ```
//!
//! 1. **Start**: one tokio task per cast member, plus the charcoal gauge.
//! 2. **Run**: sleep for the configured duration (or until interrupted).
//! 3. **Shutdown**: clear the grill's `active` flag and join every task.
//!
//! ## Graceful Shutdown
//!
//! The `active` flag is the only stop signal. Actors check it at the top of
//! every round, and every wait inside a round (for the grill, at the grill,
//! between rounds) is raced against it, so they return within one scheduler
//! turn. Anything still running after the grace period is aborted; since
//! the grill lock lives in a guard, an aborted holder still releases it.
//!
//! ## Configuration
//!
//! See [`SystemConfig`]. Per-actor probabilities and timings are in
//! [`ActorPolicy`](crate::actors::ActorPolicy).

pub mod charcoal;
pub mod config;
pub mod grill_system;
pub mod tracing;

pub use charcoal::*;
pub use config::*;
pub use grill_system::*;
pub use self::tracing::*;
