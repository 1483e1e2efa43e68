use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::charcoal::burn_charcoal;
use super::config::{CastMember, SystemConfig};
use crate::actors::{
    Actor, ActorError, ActorPolicy, Behavior, MainCook, Meddler, Role, Seasoner, Thief,
};
use crate::events::{Emphasis, EventSink};
use crate::grill::{Grill, Snapshot};
use crate::model::{CookState, Roster};

/// Runs a whole cookout: lights the grill, starts every family member in
/// their own task, and tears everything down at the end.
///
/// # Example
///
/// ```ignore
/// let system = GrillSystem::start(SystemConfig::default(), Roster::family(), Arc::new(TracingSink));
/// let report = system.run_until(tokio::signal::ctrl_c()).await;
/// report.log_summary();
/// ```
pub struct GrillSystem {
    grill: Arc<Grill>,
    config: SystemConfig,
    actors: Vec<(String, JoinHandle<Result<(), ActorError>>)>,
    charcoal: JoinHandle<()>,
}

/// What is left after shutdown.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub snapshot: Snapshot,
    /// Actors that stopped on an error, panicked, or had to be aborted.
    pub failed_actors: Vec<String>,
}

impl GrillSystem {
    /// Lights the grill and starts every cast member.
    pub fn start(config: SystemConfig, roster: Roster, sink: Arc<dyn EventSink>) -> Self {
        let grill = Arc::new(Grill::new(roster, sink));

        let actors = config
            .cast
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let seed = config.seed.map(|s| s.wrapping_add(i as u64));
                (member.name.clone(), spawn_member(member, seed, config.time_scale, &grill))
            })
            .collect();

        let charcoal = tokio::spawn(burn_charcoal(
            grill.clone(),
            config.charcoal_tick,
            config.seed.map(|s| s.wrapping_sub(1)),
        ));

        info!(
            actors = config.cast.len(),
            duration_secs = config.duration.as_secs(),
            "Cookout started"
        );
        Self { grill, config, actors, charcoal }
    }

    pub fn grill(&self) -> &Arc<Grill> {
        &self.grill
    }

    /// Lets the cookout run for the configured duration, then shuts down.
    pub async fn run(self) -> RunReport {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Like [`run`](Self::run), but also stops early when `interrupt` resolves.
    pub async fn run_until<F: Future>(self, interrupt: F) -> RunReport {
        tokio::select! {
            _ = tokio::time::sleep(self.config.duration) => {
                self.grill.emit("SYSTEM", "Time's up for the cookout", Some(Emphasis::Warning));
            }
            _ = interrupt => {
                self.grill.emit("SYSTEM", "Cookout interrupted", Some(Emphasis::Failure));
            }
        }
        self.shutdown().await
    }

    /// Ends the run and waits for every actor.
    ///
    /// 1. Clears the grill's `active` flag, which wakes every actor that is
    ///    waiting for the grill, lingering at it, or pausing.
    /// 2. Joins each actor, aborting any that overrun the grace period.
    /// 3. Takes the final snapshot.
    ///
    /// A failed actor is logged and listed in the report; it never fails
    /// the shutdown itself.
    pub async fn shutdown(self) -> RunReport {
        info!("Shutting down cookout...");
        self.grill.deactivate();

        let mut failed_actors = Vec::new();
        for (name, mut handle) in self.actors {
            match tokio::time::timeout(self.config.join_grace, &mut handle).await {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => {
                    warn!(actor = %name, error = %e, "Actor ended with an error");
                    failed_actors.push(name);
                }
                Ok(Err(e)) => {
                    error!(actor = %name, "Actor task failed: {:?}", e);
                    failed_actors.push(name);
                }
                Err(_) => {
                    warn!(actor = %name, "Actor did not stop in time, aborting");
                    handle.abort();
                    failed_actors.push(name);
                }
            }
        }
        if let Err(e) = self.charcoal.await {
            error!("Charcoal task failed: {:?}", e);
        }

        let snapshot = self.grill.snapshot().await;
        info!(failed = failed_actors.len(), "Cookout shutdown complete.");
        RunReport { snapshot, failed_actors }
    }
}

fn spawn_member(
    member: &CastMember,
    seed: Option<u64>,
    time_scale: u64,
    grill: &Arc<Grill>,
) -> JoinHandle<Result<(), ActorError>> {
    let name = &member.name;
    let policy = ActorPolicy::for_role(member.role).scaled(time_scale);
    match member.role {
        Role::MainCook => spawn_actor(name, MainCook::with_policy(policy), seed, grill),
        Role::Meddler => spawn_actor(name, Meddler::with_policy(policy), seed, grill),
        Role::Thief => spawn_actor(name, Thief::with_policy(policy), seed, grill),
        Role::Seasoner => spawn_actor(name, Seasoner::with_policy(policy), seed, grill),
    }
}

fn spawn_actor<B: Behavior>(
    name: &str,
    behavior: B,
    seed: Option<u64>,
    grill: &Arc<Grill>,
) -> JoinHandle<Result<(), ActorError>> {
    let actor = match seed {
        Some(seed) => Actor::seeded(name, behavior, seed),
        None => Actor::new(name, behavior),
    };
    tokio::spawn(actor.run(grill.clone()))
}

impl RunReport {
    /// Logs the end-of-run summary.
    pub fn log_summary(&self) {
        let stats = &self.snapshot.stats;
        let total = self.snapshot.items.len();
        info!("=== COOKOUT SUMMARY ===");
        info!(
            thefts = stats.thefts,
            interventions = stats.interventions,
            seasonings = stats.seasonings,
            conflicts = stats.conflicts,
            charcoal = self.snapshot.charcoal,
            "Statistics"
        );
        info!("Ready: {}/{}", self.snapshot.count_in(CookState::Ready), total);
        info!("Burnt: {}/{}", self.snapshot.count_in(CookState::Burnt), total);
        for item in &self.snapshot.items {
            info!(
                item = %item.name,
                state = %item.state,
                ticks = item.cook_ticks,
                stolen = item.stolen,
                seasoned = item.seasoned,
                "Final state"
            );
        }
        if !self.failed_actors.is_empty() {
            warn!(actors = ?self.failed_actors, "Some actors did not finish cleanly");
        }
    }
}
