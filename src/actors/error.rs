//! Error types for the actor loop.

use thiserror::Error;

use crate::grill::GrillError;

/// A broken invariant inside an actor's effect.
///
/// Contention (a timed-out grill, an empty pool) never shows up here. This
/// ends the actor's own loop; every other actor keeps going.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActorError {
    #[error("Grill invariant broken: {0}")]
    Grill(#[from] GrillError),
}
