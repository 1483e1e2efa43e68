//! # Family Grill Simulator
//!
//! > **One grill, seven relatives, and a lock with a timeout.**
//!
//! This crate models a family cookout as a resource-contention engine. Several
//! independently scheduled actors fight over a single exclusive resource (the
//! grill) and a few capacity-limited ones (beer, the good tongs, the seasoning),
//! while pieces of meat move through a small cooking state machine.
//!
//! ## 🏗️ Design
//!
//! ### One Lock, Scoped
//! All item mutation goes through a [`GrillGuard`](grill::GrillGuard). You get
//! one from [`Grill::acquire`](grill::Grill::acquire) with a timeout, and the
//! lock is released when it drops. Timing out is a normal outcome and is
//! counted as a conflict. Since there is exactly one exclusive resource, the
//! actors cannot deadlock; they can starve, and the tests check for that.
//!
//! ### Everything Else Is Atomic
//! Resource pools, statistics counters and the charcoal gauge are atomics. The
//! run's `active` flag is a `CancellationToken`, so every wait can be raced
//! against the end of the run.
//!
//! ### One Loop, Four Behaviours
//! You'll see `Actor<B: Behavior>` in the [`actors`] module. The round loop
//! (roll, gate, acquire, act, release, beer, pause) is written once, and each
//! family member only supplies what it does at the grill and what it does
//! instead.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Role**: the pieces of meat and their cooking lifecycle.
//! - **Key items**: [`Item`](model::Item), [`CookState`](model::CookState), [`Roster`](model::Roster).
//!
//! ### 2. The Engine ([`grill`])
//! - **Role**: the exclusive lock, the resource pools, the counters.
//! - **Key items**: [`Grill`](grill::Grill), [`ResourcePool`](grill::ResourcePool), [`Snapshot`](grill::Snapshot).
//!
//! ### 3. The Family ([`actors`])
//! - **Role**: the four behaviours and the loop they share.
//! - **Key items**: [`Behavior`](actors::Behavior), [`Actor`](actors::Actor), [`ActorPolicy`](actors::ActorPolicy).
//!
//! ### 4. The Output ([`events`])
//! - **Role**: where actors report what they did.
//! - **Key items**: [`EventSink`](events::EventSink), [`TracingSink`](events::TracingSink).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: starts the cookout, ends it, and reports.
//! - **Key items**: [`GrillSystem`](lifecycle::GrillSystem), [`SystemConfig`](lifecycle::SystemConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # A one-minute cookout with info logs
//! RUST_LOG=info cargo run
//!
//! # Ten times faster, reproducible
//! GRILL_TIME_SCALE=10 GRILL_SEED=7 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod actors;
pub mod events;
pub mod grill;
pub mod lifecycle;
pub mod model;
