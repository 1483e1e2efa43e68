//! # Event Sink
//!
//! Everything the actors do is reported through an [`EventSink`]: who did it,
//! what happened, and an optional [`Emphasis`] hint for whoever renders it.
//!
//! The core never formats or routes events itself. [`TracingSink`] is the
//! default and turns each event into a `tracing` record; tests use
//! [`mock::RecordingSink`] to assert on the trail.
//!
//! Sinks are called synchronously, sometimes while the grill lock is held, so
//! an implementation must return quickly and must not panic.

pub mod mock;

use std::fmt;
use tracing::{info, warn};

/// Rendering hint attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Lock access, resource use.
    Notice,
    /// Something finished well: a piece is ready, the lock was released.
    Success,
    /// Denied access, exhausted stock, a burnt piece.
    Failure,
    /// Low charcoal and other heads-ups.
    Warning,
    /// Flavour text from the family.
    Chatter,
    /// A theft.
    Mischief,
}

/// One thing that happened at the grill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub actor: String,
    pub description: String,
    pub emphasis: Option<Emphasis>,
}

impl Event {
    pub fn new(
        actor: impl Into<String>,
        description: impl Into<String>,
        emphasis: Option<Emphasis>,
    ) -> Self {
        Self {
            actor: actor.into(),
            description: description.into(),
            emphasis,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.actor, self.description)
    }
}

/// Receives events from the grill and the actors.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Default sink: logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        let Event { actor, description, emphasis } = event;
        match emphasis {
            Some(Emphasis::Failure) | Some(Emphasis::Warning) => {
                warn!(actor = %actor, ?emphasis, "{}", description)
            }
            _ => info!(actor = %actor, ?emphasis, "{}", description),
        }
    }
}
