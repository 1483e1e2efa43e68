//! Tunable knobs for an actor's loop.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Role;

/// A uniformly random duration between `min_ms` and `max_ms`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pause {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Pause {
    pub const fn between(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }
}

/// Probabilities and timings for one actor.
///
/// Each behaviour ships a default matching the family's habits; tests and
/// callers may override any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorPolicy {
    /// Chance per round of going for the grill instead of idling.
    pub access_probability: f64,
    /// How long to wait for the grill before giving up.
    pub lock_timeout_ms: u64,
    /// Time spent at the grill once the effect has happened.
    pub hold: Pause,
    /// Time between rounds.
    pub pause: Pause,
    /// Chance per round of grabbing a beer.
    pub beverage_probability: f64,
}

impl ActorPolicy {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// The default habits for `role`.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::MainCook => Self::main_cook(),
            Role::Meddler => Self::meddler(),
            Role::Thief => Self::thief(),
            Role::Seasoner => Self::seasoner(),
        }
    }

    /// The shortest wait this policy ever asks for, in milliseconds.
    pub fn shortest_ms(&self) -> u64 {
        self.lock_timeout_ms.min(self.hold.min_ms).min(self.pause.min_ms)
    }

    pub fn main_cook() -> Self {
        Self {
            access_probability: 1.0,
            lock_timeout_ms: 3000,
            hold: Pause::between(1000, 3000),
            pause: Pause::between(2000, 5000),
            beverage_probability: 0.3,
        }
    }

    pub fn meddler() -> Self {
        Self {
            access_probability: 0.3,
            lock_timeout_ms: 1500,
            hold: Pause::between(500, 1500),
            pause: Pause::between(3000, 7000),
            beverage_probability: 0.5,
        }
    }

    pub fn thief() -> Self {
        Self {
            access_probability: 0.4,
            lock_timeout_ms: 800,
            hold: Pause::fixed(200),
            pause: Pause::between(4000, 10000),
            beverage_probability: 0.0,
        }
    }

    pub fn seasoner() -> Self {
        Self {
            access_probability: 0.6,
            lock_timeout_ms: 2000,
            hold: Pause::fixed(300),
            pause: Pause::between(5000, 10000),
            beverage_probability: 0.0,
        }
    }

    /// Same probabilities, every duration divided by `factor` and kept at 1 ms or more.
    ///
    /// Handy for demos and soak tests that want many rounds quickly.
    pub fn scaled(&self, factor: u64) -> Self {
        let factor = factor.max(1);
        let scale = |ms: u64| (ms / factor).max(1);
        let scale_pause = |p: Pause| Pause::between(scale(p.min_ms), scale(p.max_ms));
        Self {
            lock_timeout_ms: scale(self.lock_timeout_ms),
            hold: scale_pause(self.hold),
            pause: scale_pause(self.pause),
            ..self.clone()
        }
    }
}
