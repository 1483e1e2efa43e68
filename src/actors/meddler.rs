//! The uncles: lots of advice, no effect on the meat.

use async_trait::async_trait;
use rand::rngs::StdRng;

use super::{linger, pick, ActorError, ActorPolicy, Behavior, Role};
use crate::events::Emphasis;
use crate::grill::{Grill, GrillGuard};

const INTERVENTIONS: &[&str] = &[
    "flips a piece for no reason",
    "rearranges the coals",
    "pokes the meat to check if it's done",
    "moves a piece to the cooler side",
    "explains the cook's technique to the cook",
];

const COMMENTARY: &[&str] = &[
    "'That meat needs more fire...'",
    "'In my day we used quebracho wood'",
    "'You're turning it too early'",
];

/// Occasionally takes the grill to "help", otherwise comments from a distance.
#[derive(Debug, Clone)]
pub struct Meddler {
    policy: ActorPolicy,
}

impl Meddler {
    pub fn new() -> Self {
        Self::with_policy(ActorPolicy::meddler())
    }

    pub fn with_policy(policy: ActorPolicy) -> Self {
        Self { policy }
    }
}

impl Default for Meddler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for Meddler {
    fn role(&self) -> Role {
        Role::Meddler
    }

    fn policy(&self) -> &ActorPolicy {
        &self.policy
    }

    fn arrival(&self) -> &'static str {
        "shows up with opinions"
    }

    fn departure(&self) -> &'static str {
        "heads home"
    }

    async fn at_grill(
        &mut self,
        actor: &str,
        _guard: &mut GrillGuard<'_>,
        grill: &Grill,
        rng: &mut StdRng,
    ) -> Result<(), ActorError> {
        grill.emit(actor, pick(INTERVENTIONS, rng), Some(Emphasis::Chatter));
        grill.stats().record_intervention();
        linger(grill, self.policy.hold.sample(rng)).await;
        Ok(())
    }

    fn idle(&mut self, actor: &str, grill: &Grill, rng: &mut StdRng) {
        grill.emit(actor, pick(COMMENTARY, rng), Some(Emphasis::Chatter));
    }
}
