//! The main cook: the only one who actually cooks.

use async_trait::async_trait;
use rand::rngs::StdRng;
use tracing::debug;

use super::{linger, ActorError, ActorPolicy, Behavior, Role};
use crate::events::Emphasis;
use crate::grill::{Grill, GrillGuard};
use crate::model::{Advance, Transition};

/// Goes for the grill every round and runs a cooking pass over every piece.
#[derive(Debug, Clone)]
pub struct MainCook {
    policy: ActorPolicy,
}

impl MainCook {
    pub fn new() -> Self {
        Self::with_policy(ActorPolicy::main_cook())
    }

    pub fn with_policy(policy: ActorPolicy) -> Self {
        Self { policy }
    }
}

impl Default for MainCook {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(t: &Transition) -> (String, Option<Emphasis>) {
    match t.to {
        Advance::Searing => (format!("starts searing {}", t.item), None),
        Advance::FirstTurn => (format!("turns {}", t.item), None),
        Advance::SecondTurn => (format!("gives {} its second turn", t.item), None),
        Advance::Ready => (format!("{} is ready!", t.item), Some(Emphasis::Success)),
        Advance::Burnt => (format!("{} got burnt!", t.item), Some(Emphasis::Failure)),
    }
}

/// One cooking pass over every piece on the grill.
pub fn cooking_pass(guard: &mut GrillGuard<'_>, rng: &mut StdRng) -> Vec<Transition> {
    guard.iter_mut().filter_map(|item| item.cook(rng)).collect()
}

#[async_trait]
impl Behavior for MainCook {
    fn role(&self) -> Role {
        Role::MainCook
    }

    fn policy(&self) -> &ActorPolicy {
        &self.policy
    }

    fn arrival(&self) -> &'static str {
        "takes charge of the grill"
    }

    fn departure(&self) -> &'static str {
        "hangs up the apron"
    }

    async fn at_grill(
        &mut self,
        actor: &str,
        guard: &mut GrillGuard<'_>,
        grill: &Grill,
        rng: &mut StdRng,
    ) -> Result<(), ActorError> {
        let transitions = cooking_pass(guard, rng);
        debug!(actor, changed = transitions.len(), "Cooking pass");
        for t in &transitions {
            let (line, emphasis) = describe(t);
            grill.emit(actor, line, emphasis);
        }
        linger(grill, self.policy.hold.sample(rng)).await;
        Ok(())
    }
}
