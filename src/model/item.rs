//! A single piece of meat on the grill and its cooking state machine.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grill::GrillError;

/// Probability that a raw piece starts searing on a given pass.
pub const SEAR_PROBABILITY: f64 = 0.4;

/// Probability that a piece past its second turn comes out ready instead of burnt.
pub const READY_PROBABILITY: f64 = 0.8;

/// The five kinds of meat on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeatKind {
    Chorizo,
    Morcilla,
    ShortRib,
    Flank,
    Chicken,
}

impl MeatKind {
    /// Chorizo and morcilla are what the cousins go after.
    pub fn is_high_value(self) -> bool {
        matches!(self, MeatKind::Chorizo | MeatKind::Morcilla)
    }
}

impl fmt::Display for MeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeatKind::Chorizo => "chorizo",
            MeatKind::Morcilla => "morcilla",
            MeatKind::ShortRib => "short rib",
            MeatKind::Flank => "flank",
            MeatKind::Chicken => "chicken",
        };
        f.write_str(label)
    }
}

/// Cooking states, declared in forward order.
///
/// The derived `Ord` follows declaration order, so `a < b` means `a` comes
/// earlier in the lifecycle. `Ready` and `Burnt` are both terminal and
/// neither follows the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CookState {
    Raw,
    Searing,
    FirstTurn,
    SecondTurn,
    Ready,
    Burnt,
}

impl CookState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CookState::Ready | CookState::Burnt)
    }

    /// Evaluates one row of the transition table.
    ///
    /// `ticks` is the tick count *before* this pass increments it. The random
    /// draw is only taken for the rows that need one, so a pass over a
    /// searing or turning piece consumes no randomness.
    pub fn next(self, ticks: u32, rng: &mut impl Rng) -> Option<Advance> {
        match self {
            CookState::Raw => (rng.random::<f64>() < SEAR_PROBABILITY).then_some(Advance::Searing),
            CookState::Searing => (ticks > 2).then_some(Advance::FirstTurn),
            CookState::FirstTurn => (ticks > 4).then_some(Advance::SecondTurn),
            CookState::SecondTurn if ticks > 6 => {
                if rng.random::<f64>() < READY_PROBABILITY {
                    Some(Advance::Ready)
                } else {
                    Some(Advance::Burnt)
                }
            }
            CookState::SecondTurn | CookState::Ready | CookState::Burnt => None,
        }
    }
}

impl fmt::Display for CookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CookState::Raw => "raw",
            CookState::Searing => "searing",
            CookState::FirstTurn => "first-turn",
            CookState::SecondTurn => "second-turn",
            CookState::Ready => "ready",
            CookState::Burnt => "burnt",
        };
        f.write_str(label)
    }
}

/// A state a cooking pass can move a piece into. Nothing goes back to raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advance {
    Searing,
    FirstTurn,
    SecondTurn,
    Ready,
    Burnt,
}

impl From<Advance> for CookState {
    fn from(advance: Advance) -> Self {
        match advance {
            Advance::Searing => CookState::Searing,
            Advance::FirstTurn => CookState::FirstTurn,
            Advance::SecondTurn => CookState::SecondTurn,
            Advance::Ready => CookState::Ready,
            Advance::Burnt => CookState::Burnt,
        }
    }
}

/// A state change produced by a cooking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub item: String,
    pub from: CookState,
    pub to: Advance,
}

/// One piece of meat.
///
/// Fields are private: every mutation goes through a method that enforces
/// the lifecycle rules, and the only way to reach a `&mut Item` is through a
/// held [`GrillGuard`](crate::grill::GrillGuard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    kind: MeatKind,
    name: String,
    state: CookState,
    cook_ticks: u32,
    stolen: bool,
    seasoned: bool,
}

impl Item {
    pub fn new(kind: MeatKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            state: CookState::Raw,
            cook_ticks: 0,
            stolen: false,
            seasoned: false,
        }
    }

    pub fn kind(&self) -> MeatKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CookState {
        self.state
    }

    pub fn cook_ticks(&self) -> u32 {
        self.cook_ticks
    }

    pub fn is_stolen(&self) -> bool {
        self.stolen
    }

    pub fn is_seasoned(&self) -> bool {
        self.seasoned
    }

    /// Runs one cooking pass over this piece.
    ///
    /// Stolen pieces are skipped entirely. Any other piece gets its tick
    /// incremented whether or not a transition fired.
    pub fn cook(&mut self, rng: &mut impl Rng) -> Option<Transition> {
        if self.stolen {
            return None;
        }
        let transition = self.state.next(self.cook_ticks, rng).map(|to| {
            let from = self.state;
            self.state = to.into();
            Transition {
                item: self.name.clone(),
                from,
                to,
            }
        });
        self.cook_ticks += 1;
        transition
    }

    /// Worth stealing: high-value kind, not gone yet, second turn or ready.
    pub fn is_steal_target(&self) -> bool {
        !self.stolen
            && self.kind.is_high_value()
            && matches!(self.state, CookState::SecondTurn | CookState::Ready)
    }

    /// Can take seasoning: still on the grill, not seasoned, neither raw nor burnt.
    pub fn is_season_target(&self) -> bool {
        !self.stolen
            && !self.seasoned
            && !matches!(self.state, CookState::Raw | CookState::Burnt)
    }

    pub fn mark_stolen(&mut self) -> Result<(), GrillError> {
        if self.stolen {
            return Err(GrillError::AlreadyStolen(self.name.clone()));
        }
        self.stolen = true;
        Ok(())
    }

    pub fn season(&mut self) -> Result<(), GrillError> {
        if self.stolen {
            return Err(GrillError::AlreadyStolen(self.name.clone()));
        }
        if self.seasoned {
            return Err(GrillError::AlreadySeasoned(self.name.clone()));
        }
        self.seasoned = true;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_state(mut self, state: CookState, cook_ticks: u32) -> Self {
        self.state = state;
        self.cook_ticks = cook_ticks;
        self
    }
}
