//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the binary.
//! Verbosity comes from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start, finish, rounds played, fatal errors
//! - **Grill contention**: timeouts with the actor and the timeout that ran out
//! - **Cooking**: how many pieces changed state on each pass (`debug`)
//! - **Events**: with the default [`TracingSink`](crate::events::TracingSink), every
//!   event the actors emit becomes a log line with `actor` and `emphasis` fields
//!
//! ## Usage Examples
//!
//! ```bash
//! # The cookout as it happens
//! RUST_LOG=info cargo run
//!
//! # Plus cooking passes, timeouts and charcoal ticks
//! RUST_LOG=debug cargo run
//!
//! # Only the grill internals
//! RUST_LOG=grill_sim::grill=trace cargo run
//! ```
//!
//! ## Sample Output
//!
//! ```text
//! INFO Actor started actor="Head Cook" role=main cook
//! INFO takes over the grill actor=Head Cook emphasis=Some(Notice)
//! INFO starts searing chorizo-1 actor=Head Cook emphasis=None
//! WARN could not get to the grill (timeout) actor=Cousin Maxi emphasis=Some(Failure)
//! INFO stole morcilla-2! actor=Cousin Sebastian emphasis=Some(Mischief)
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Actor names already say who is talking
        .compact()
        .init();
}
