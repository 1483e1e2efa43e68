//! Error types for the grill and the items on it.

use std::time::Duration;
use thiserror::Error;

/// Broken invariants on the roster or on an item.
///
/// Roster errors can only come from a bad initial roster. Item errors mean an
/// actor tried to act on a piece it should have filtered out first; they end
/// that actor's loop and nothing else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrillError {
    /// The roster has no pieces.
    #[error("Roster is empty")]
    EmptyRoster,

    /// Two pieces share a name.
    #[error("Duplicate item name: {0}")]
    DuplicateItem(String),

    /// The piece is already gone.
    #[error("Item already stolen: {0}")]
    AlreadyStolen(String),

    /// The piece was seasoned before.
    #[error("Item already seasoned: {0}")]
    AlreadySeasoned(String),
}

/// Why a bounded grill acquisition came back without the lock.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    /// Someone else held the grill for the whole window. Counted as a conflict.
    #[error("Timed out after {0:?} waiting for the grill")]
    TimedOut(Duration),

    /// The run ended while waiting.
    #[error("Grill closed")]
    Closed,
}
