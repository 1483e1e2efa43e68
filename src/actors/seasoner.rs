//! The grandmother: seasons one piece at a time, needs the seasoning first.

use async_trait::async_trait;
use rand::rngs::StdRng;

use super::{linger, pick, ActorError, ActorPolicy, Behavior, Gate, Role};
use crate::events::Emphasis;
use crate::grill::{Grill, GrillGuard};

const COMMENTARY: &[&str] = &[
    "'That meat needs salt'",
    "'Tekaka la ejapo'",
    "'It's too dry, it needs more fat'",
    "'That's how your grandfather did it'",
    "'Not so much salt!'",
    "'That one is perfect'",
];

/// Takes a seasoning unit, then the grill, and seasons the first eligible piece.
#[derive(Debug, Clone)]
pub struct Seasoner {
    policy: ActorPolicy,
}

impl Seasoner {
    pub fn new() -> Self {
        Self::with_policy(ActorPolicy::seasoner())
    }

    pub fn with_policy(policy: ActorPolicy) -> Self {
        Self { policy }
    }
}

impl Default for Seasoner {
    fn default() -> Self {
        Self::new()
    }
}

/// Seasons the first eligible piece, at most one per call.
pub fn season_one(guard: &mut GrillGuard<'_>) -> Result<Option<String>, ActorError> {
    match guard.iter_mut().find(|item| item.is_season_target()) {
        Some(item) => {
            item.season()?;
            Ok(Some(item.name().to_string()))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl Behavior for Seasoner {
    fn role(&self) -> Role {
        Role::Seasoner
    }

    fn policy(&self) -> &ActorPolicy {
        &self.policy
    }

    fn arrival(&self) -> &'static str {
        "starts supervising"
    }

    fn departure(&self) -> &'static str {
        "is done supervising"
    }

    fn gate<'g>(&self, actor: &str, grill: &'g Grill) -> Gate<'g> {
        match grill.use_seasoning(actor) {
            Some(permit) => Gate::Holding(permit),
            None => Gate::Shut,
        }
    }

    async fn at_grill(
        &mut self,
        actor: &str,
        guard: &mut GrillGuard<'_>,
        grill: &Grill,
        rng: &mut StdRng,
    ) -> Result<(), ActorError> {
        if let Some(name) = season_one(guard)? {
            grill.stats().record_seasoning();
            grill.emit(actor, format!("seasons {name}"), Some(Emphasis::Success));
            linger(grill, self.policy.hold.sample(rng)).await;
        }
        Ok(())
    }

    fn idle(&mut self, actor: &str, grill: &Grill, rng: &mut StdRng) {
        grill.emit(actor, pick(COMMENTARY, rng), Some(Emphasis::Chatter));
    }
}
