//! # Actors
//!
//! Four family members share the grill, each with its own habits:
//!
//! | Role | Goes for the grill | While holding it |
//! |---|---|---|
//! | [`MainCook`] | every round | cooks every piece one pass |
//! | [`Meddler`] | 30% of rounds | "helps" (no effect on the meat) |
//! | [`Thief`] | 40% of rounds | pockets the first ripe chorizo or morcilla |
//! | [`Seasoner`] | 60% of rounds, if she gets the seasoning | seasons one piece |
//!
//! ## One Loop, Four Behaviours
//!
//! The loop is written once, in [`Actor::run`]. A [`Behavior`] only says what
//! happens at the grill, what happens instead of going to the grill, and
//! whether anything must be in hand before trying (the seasoning, for the
//! grandmother). Probabilities and timings come from its [`ActorPolicy`].
//!
//! Each round:
//! 1. Stop if the run has ended.
//! 2. Roll the access probability. On a hit, pass the [`Gate`], wait for the
//!    grill with the policy timeout, and run [`Behavior::at_grill`]. On a
//!    miss, run [`Behavior::idle`].
//! 3. Maybe grab a beer.
//! 4. Pause.
//!
//! The grill guard and any pool permit drop at the end of step 2 on every
//! path. Waiting for the grill, lingering at it, and pausing all wake up as
//! soon as the run ends.

pub mod error;
pub mod main_cook;
pub mod meddler;
pub mod policy;
pub mod seasoner;
pub mod thief;

pub use error::*;
pub use main_cook::*;
pub use meddler::*;
pub use policy::*;
pub use seasoner::*;
pub use thief::*;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::events::Emphasis;
use crate::grill::{AccessError, Grill, GrillGuard, PoolPermit};

/// Which of the four behaviours an actor follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    MainCook,
    Meddler,
    Thief,
    Seasoner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::MainCook => "main cook",
            Role::Meddler => "meddler",
            Role::Thief => "thief",
            Role::Seasoner => "seasoner",
        };
        f.write_str(label)
    }
}

/// What must be in hand before going for the grill.
pub enum Gate<'g> {
    /// Nothing needed.
    Open,
    /// Holding a pool unit; it goes back when the round's grill attempt ends.
    Holding(PoolPermit<'g>),
    /// Could not get what was needed; skip the grill this round.
    Shut,
}

/// Everything an actor does differently from the others.
#[async_trait]
pub trait Behavior: Send + 'static {
    fn role(&self) -> Role;

    fn policy(&self) -> &ActorPolicy;

    /// Announced when the actor shows up.
    fn arrival(&self) -> &'static str;

    /// Announced when the actor leaves.
    fn departure(&self) -> &'static str;

    /// Called before each grill attempt.
    fn gate<'g>(&self, _actor: &str, _grill: &'g Grill) -> Gate<'g> {
        Gate::Open
    }

    /// The effect while holding the grill.
    ///
    /// Any waiting here must go through [`linger`] so it ends with the run.
    async fn at_grill(
        &mut self,
        actor: &str,
        guard: &mut GrillGuard<'_>,
        grill: &Grill,
        rng: &mut StdRng,
    ) -> Result<(), ActorError>;

    /// What happens on a round without a grill attempt.
    fn idle(&mut self, _actor: &str, _grill: &Grill, _rng: &mut StdRng) {}
}

/// Sleeps for `duration` unless the run ends first. Returns `false` if it did.
pub async fn linger(grill: &Grill, duration: Duration) -> bool {
    tokio::select! {
        biased;
        _ = grill.closed() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Picks one line of flavour text.
pub(crate) fn pick<'a>(lines: &[&'a str], rng: &mut StdRng) -> &'a str {
    lines[rng.random_range(0..lines.len())]
}

/// A named family member running one [`Behavior`].
pub struct Actor<B: Behavior> {
    name: String,
    behavior: B,
    rng: StdRng,
    max_rounds: Option<u64>,
}

impl<B: Behavior> Actor<B> {
    /// An actor seeded from the OS.
    pub fn new(name: impl Into<String>, behavior: B) -> Self {
        Self {
            name: name.into(),
            behavior,
            rng: StdRng::from_os_rng(),
            max_rounds: None,
        }
    }

    /// An actor with a reproducible random source.
    pub fn seeded(name: impl Into<String>, behavior: B, seed: u64) -> Self {
        Self {
            name: name.into(),
            behavior,
            rng: StdRng::seed_from_u64(seed),
            max_rounds: None,
        }
    }

    /// Stop after `rounds` rounds even if the run is still going.
    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.behavior.role()
    }

    /// Runs rounds until the grill goes inactive (or the round limit is hit).
    ///
    /// Returns `Err` only for a broken invariant inside the effect, which
    /// ends this actor and no other.
    pub async fn run(mut self, grill: Arc<Grill>) -> Result<(), ActorError> {
        let role = self.behavior.role();
        info!(actor = %self.name, %role, "Actor started");
        grill.emit(&self.name, self.behavior.arrival(), Some(Emphasis::Notice));

        let mut rounds = 0u64;
        let result = loop {
            if !grill.is_active() || self.max_rounds.is_some_and(|max| rounds >= max) {
                break Ok(());
            }
            rounds += 1;

            match self.round(&grill).await {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(e) => {
                    error!(actor = %self.name, %role, error = %e, "Actor stopped");
                    break Err(e);
                }
            }

            let policy = self.behavior.policy();
            if self.rng.random_bool(policy.beverage_probability.clamp(0.0, 1.0)) {
                grill.take_beverage(&self.name);
            }

            let pause = self.behavior.policy().pause.sample(&mut self.rng);
            if !linger(&grill, pause).await {
                break Ok(());
            }
        };

        grill.emit(&self.name, self.behavior.departure(), Some(Emphasis::Notice));
        info!(actor = %self.name, %role, rounds, "Actor finished");
        result
    }

    /// One grill attempt or idle turn. `Ok(false)` means the run ended mid-round.
    async fn round(&mut self, grill: &Grill) -> Result<bool, ActorError> {
        let policy = self.behavior.policy();
        let timeout = policy.lock_timeout();
        if !self.rng.random_bool(policy.access_probability.clamp(0.0, 1.0)) {
            self.behavior.idle(&self.name, grill, &mut self.rng);
            return Ok(true);
        }

        let _permit = match self.behavior.gate(&self.name, grill) {
            Gate::Open => None,
            Gate::Holding(permit) => Some(permit),
            Gate::Shut => return Ok(true),
        };

        match grill.acquire(&self.name, timeout).await {
            Ok(mut guard) => {
                self.behavior
                    .at_grill(&self.name, &mut guard, grill, &mut self.rng)
                    .await?;
                Ok(grill.is_active())
            }
            Err(AccessError::TimedOut(_)) => Ok(true),
            Err(AccessError::Closed) => {
                debug!(actor = %self.name, "Run ended while waiting for the grill");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingSink;
    use crate::model::Roster;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how many holders are at the grill at once.
    struct Visitor {
        policy: ActorPolicy,
        inside: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        visits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Behavior for Visitor {
        fn role(&self) -> Role {
            Role::Meddler
        }
        fn policy(&self) -> &ActorPolicy {
            &self.policy
        }
        fn arrival(&self) -> &'static str {
            "arrives"
        }
        fn departure(&self) -> &'static str {
            "leaves"
        }
        async fn at_grill(
            &mut self,
            actor: &str,
            _guard: &mut GrillGuard<'_>,
            grill: &Grill,
            _rng: &mut StdRng,
        ) -> Result<(), ActorError> {
            let now = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            assert_eq!(grill.holder().as_deref(), Some(actor));
            tokio::task::yield_now().await;
            linger(grill, Duration::from_millis(5)).await;
            self.inside.fetch_sub(1, Ordering::SeqCst);
            self.visits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_holder_under_stress() {
        let grill = Arc::new(Grill::new(Roster::family(), Arc::new(RecordingSink::new())));
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let visits = Arc::new(AtomicUsize::new(0));
        let policy = ActorPolicy {
            access_probability: 1.0,
            lock_timeout_ms: 20,
            hold: Pause::fixed(0),
            pause: Pause::between(0, 2),
            beverage_probability: 0.0,
        };

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let visitor = Visitor {
                    policy: policy.clone(),
                    inside: inside.clone(),
                    peak: peak.clone(),
                    visits: visits.clone(),
                };
                let actor = Actor::seeded(format!("visitor-{i}"), visitor, i).with_rounds(20);
                tokio::spawn(actor.run(grill.clone()))
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        let stats = grill.stats().snapshot();
        assert_eq!(visits.load(Ordering::SeqCst) as u64 + stats.conflicts, 160);
        assert_eq!(grill.holder(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_limit_and_departure() {
        let sink = Arc::new(RecordingSink::new());
        let grill = Arc::new(Grill::new(Roster::family(), sink.clone()));
        let visitor = Visitor {
            policy: ActorPolicy { access_probability: 0.0, ..ActorPolicy::meddler() },
            inside: Arc::default(),
            peak: Arc::default(),
            visits: Arc::default(),
        };
        Actor::seeded("uncle", visitor, 1).with_rounds(3).run(grill).await.unwrap();
        let events = sink.by_actor("uncle");
        assert_eq!(events.first().map(|e| e.description.as_str()), Some("arrives"));
        assert_eq!(events.last().map(|e| e.description.as_str()), Some("leaves"));
    }
}
