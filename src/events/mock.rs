//! # Recording Sink
//!
//! An [`EventSink`] that keeps every event in memory so tests can assert on
//! what the actors reported.
//!
//! ```ignore
//! let sink = Arc::new(RecordingSink::new());
//! let grill = Grill::new(Roster::family(), sink.clone());
//! // ... drive some actors ...
//! assert_eq!(sink.count_containing("stole"), 1);
//! ```

use super::{Event, EventSink};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far, in emission order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Events emitted by one actor.
    pub fn by_actor(&self, actor: &str) -> Vec<Event> {
        self.events().into_iter().filter(|e| e.actor == actor).collect()
    }

    /// Number of events whose description contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.events().iter().filter(|e| e.description.contains(needle)).count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(event);
    }
}
