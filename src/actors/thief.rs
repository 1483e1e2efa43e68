//! The cousins: in and out before anyone notices.

use async_trait::async_trait;
use rand::rngs::StdRng;

use super::{linger, ActorError, ActorPolicy, Behavior, Role};
use crate::events::Emphasis;
use crate::grill::{Grill, GrillGuard};

/// Waits briefly for the grill and pockets the first ripe chorizo or morcilla.
#[derive(Debug, Clone)]
pub struct Thief {
    policy: ActorPolicy,
}

impl Thief {
    pub fn new() -> Self {
        Self::with_policy(ActorPolicy::thief())
    }

    pub fn with_policy(policy: ActorPolicy) -> Self {
        Self { policy }
    }
}

impl Default for Thief {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks the first steal target as stolen and returns its name.
pub fn steal(guard: &mut GrillGuard<'_>) -> Result<Option<String>, ActorError> {
    match guard.iter_mut().find(|item| item.is_steal_target()) {
        Some(item) => {
            item.mark_stolen()?;
            Ok(Some(item.name().to_string()))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl Behavior for Thief {
    fn role(&self) -> Role {
        Role::Thief
    }

    fn policy(&self) -> &ActorPolicy {
        &self.policy
    }

    fn arrival(&self) -> &'static str {
        "lurks near the grill"
    }

    fn departure(&self) -> &'static str {
        "slips away"
    }

    async fn at_grill(
        &mut self,
        actor: &str,
        guard: &mut GrillGuard<'_>,
        grill: &Grill,
        rng: &mut StdRng,
    ) -> Result<(), ActorError> {
        match steal(guard)? {
            Some(name) => {
                grill.stats().record_theft();
                grill.emit(actor, format!("stole {name}!"), Some(Emphasis::Mischief));
                linger(grill, self.policy.hold.sample(rng)).await;
            }
            None => grill.emit(actor, "finds nothing worth taking", Some(Emphasis::Mischief)),
        }
        Ok(())
    }

    fn idle(&mut self, actor: &str, grill: &Grill, _rng: &mut StdRng) {
        grill.emit(actor, "acts innocent...", Some(Emphasis::Chatter));
    }
}
