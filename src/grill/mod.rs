//! # The Grill
//!
//! The one exclusive resource in the system. Every item mutation happens
//! through a [`GrillGuard`], which is only handed out by
//! [`Grill::acquire`] and releases the lock when it drops, so an early
//! return, a `?`, or an aborted task cannot leave the grill held.
//!
//! ## Bounded Waits
//!
//! `acquire` never waits longer than the caller's timeout. Running out of
//! time is the normal outcome of contention, not a failure: it bumps the
//! conflict counter and comes back as [`AccessError::TimedOut`]. There is no
//! fairness; a patient actor can lose to an impatient one indefinitely.
//!
//! ## Shared State Outside the Lock
//!
//! The resource pools, the statistics counters, the charcoal gauge and the
//! `active` flag are all atomics (or a [`CancellationToken`] for the flag) and
//! never need the grill lock.

pub mod error;
pub mod pool;
pub mod stats;

pub use error::*;
pub use pool::*;
pub use stats::*;

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::events::{Emphasis, Event, EventSink};
use crate::model::Roster;

/// Charcoal level at the start of a run.
pub const FULL_CHARCOAL: u32 = 100;

/// The shared cooking surface and everything around it.
pub struct Grill {
    surface: Mutex<Roster>,
    holder: StdMutex<Option<String>>,
    pools: Pools,
    stats: GrillStats,
    active: CancellationToken,
    charcoal: AtomicU32,
    sink: Arc<dyn EventSink>,
}

impl Grill {
    pub fn new(roster: Roster, sink: Arc<dyn EventSink>) -> Self {
        debug!(items = roster.len(), "Grill lit");
        Self {
            surface: Mutex::new(roster),
            holder: StdMutex::new(None),
            pools: Pools::default(),
            stats: GrillStats::default(),
            active: CancellationToken::new(),
            charcoal: AtomicU32::new(FULL_CHARCOAL),
            sink,
        }
    }

    // --- Run flag ---

    pub fn is_active(&self) -> bool {
        !self.active.is_cancelled()
    }

    /// Ends the run. Idempotent; only the coordinator should call it.
    pub fn deactivate(&self) {
        self.active.cancel();
    }

    /// Resolves once the run has ended.
    pub async fn closed(&self) {
        self.active.cancelled().await
    }

    // --- Exclusive access ---

    /// Waits up to `timeout` for exclusive access to the items.
    ///
    /// Returns [`AccessError::Closed`] straight away if the run has ended,
    /// or as soon as it ends while waiting.
    pub async fn acquire(
        &self,
        actor: &str,
        timeout: Duration,
    ) -> Result<GrillGuard<'_>, AccessError> {
        let attempt = tokio::time::timeout(timeout, self.surface.lock());
        tokio::select! {
            biased;
            _ = self.active.cancelled() => {
                trace!(actor, "Grill closed while waiting");
                Err(AccessError::Closed)
            }
            result = attempt => match result {
                Ok(items) => {
                    let previous = self.lock_holder().replace(actor.to_string());
                    debug_assert!(previous.is_none(), "grill already held by {previous:?}");
                    self.emit(actor, "takes over the grill", Some(Emphasis::Notice));
                    Ok(GrillGuard { grill: self, actor: actor.to_string(), items })
                }
                Err(_) => {
                    self.stats.record_conflict();
                    debug!(actor, timeout_ms = timeout.as_millis() as u64, "Grill timeout");
                    let line = "could not get to the grill (timeout)";
                    self.emit(actor, line, Some(Emphasis::Failure));
                    Err(AccessError::TimedOut(timeout))
                }
            }
        }
    }

    /// Name of the actor currently holding the grill, if any.
    pub fn holder(&self) -> Option<String> {
        self.lock_holder().clone()
    }

    fn lock_holder(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.holder.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // --- Resource pools ---

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Grabs a beer if any is left. Beer is drunk, never returned.
    pub fn take_beverage(&self, actor: &str) -> bool {
        if self.pools.beverage.try_acquire() {
            self.emit(actor, "grabs a beer", Some(Emphasis::Notice));
            true
        } else {
            self.emit(actor, "finds the cooler empty", Some(Emphasis::Failure));
            false
        }
    }

    /// Takes the good tongs if nobody has them.
    pub fn use_utensil(&self, actor: &str) -> bool {
        let taken = self.pools.utensil.try_acquire();
        if taken {
            self.emit(actor, "picks up the good tongs", Some(Emphasis::Notice));
        }
        taken
    }

    pub fn return_utensil(&self, actor: &str) {
        self.pools.utensil.release();
        self.emit(actor, "puts the good tongs back", Some(Emphasis::Notice));
    }

    /// Reaches for the seasoning; the permit goes back when dropped.
    pub fn use_seasoning(&self, actor: &str) -> Option<PoolPermit<'_>> {
        let permit = self.pools.seasoning.try_permit();
        if permit.is_some() {
            self.emit(actor, "reaches for the seasoning", Some(Emphasis::Notice));
        }
        permit
    }

    // --- Statistics & reporting ---

    pub fn stats(&self) -> &GrillStats {
        &self.stats
    }

    pub fn charcoal(&self) -> u32 {
        self.charcoal.load(Ordering::Relaxed)
    }

    /// Burns `units` of charcoal, stopping at zero. Returns what is left.
    pub fn burn_charcoal(&self, units: u32) -> u32 {
        let previous = self
            .charcoal
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |level| {
                Some(level.saturating_sub(units))
            })
            .unwrap_or_default();
        previous.saturating_sub(units)
    }

    /// Counters plus every item's current state. Waits for the grill.
    pub async fn snapshot(&self) -> Snapshot {
        let roster = self.surface.lock().await;
        Snapshot::capture(self.stats.snapshot(), &roster, self.charcoal())
    }

    pub fn emit(&self, actor: &str, description: impl Into<String>, emphasis: Option<Emphasis>) {
        self.sink.emit(Event::new(actor, description, emphasis));
    }
}

/// Exclusive access to the items on the grill.
///
/// Dereferences to the [`Roster`]. Dropping the guard releases the grill.
pub struct GrillGuard<'a> {
    grill: &'a Grill,
    actor: String,
    items: MutexGuard<'a, Roster>,
}

impl Deref for GrillGuard<'_> {
    type Target = Roster;

    fn deref(&self) -> &Roster {
        &self.items
    }
}

impl DerefMut for GrillGuard<'_> {
    fn deref_mut(&mut self) -> &mut Roster {
        &mut self.items
    }
}

impl Drop for GrillGuard<'_> {
    fn drop(&mut self) {
        // Cleared before `items` drops, so the holder slot is empty by the
        // time the next acquirer gets the mutex.
        self.grill.lock_holder().take();
        self.grill.emit(&self.actor, "steps away from the grill", Some(Emphasis::Success));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingSink;

    fn grill() -> (Arc<Grill>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (Arc::new(Grill::new(Roster::family(), sink.clone())), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_acquire_times_out_and_counts_conflict() {
        let (grill, sink) = grill();
        let guard = grill.acquire("cook", Duration::from_millis(100)).await.unwrap();
        assert_eq!(grill.holder().as_deref(), Some("cook"));

        let denied = grill.acquire("cousin", Duration::from_millis(800)).await;
        assert_eq!(denied.err(), Some(AccessError::TimedOut(Duration::from_millis(800))));
        assert_eq!(grill.stats().snapshot().conflicts, 1);

        drop(guard);
        assert_eq!(grill.holder(), None);
        let again = grill.acquire("cousin", Duration::from_millis(800)).await;
        assert!(again.is_ok());
        assert_eq!(sink.count_containing("timeout"), 1);
        assert_eq!(sink.count_containing("steps away"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_after_deactivate_is_closed() {
        let (grill, _) = grill();
        grill.deactivate();
        assert!(!grill.is_active());
        let result = grill.acquire("cook", Duration::from_secs(3)).await;
        assert_eq!(result.err(), Some(AccessError::Closed));
        assert_eq!(grill.stats().snapshot().conflicts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiter_wakes_when_run_ends() {
        let (grill, _) = grill();
        let _guard = grill.acquire("cook", Duration::from_secs(1)).await.unwrap();
        let waiter = {
            let grill = grill.clone();
            tokio::spawn(async move { grill.acquire("uncle", Duration::from_secs(60)).await.err() })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        grill.deactivate();
        assert_eq!(waiter.await.unwrap(), Some(AccessError::Closed));
    }

    #[tokio::test]
    async fn test_beverages_run_out() {
        let (grill, sink) = grill();
        let taken = (0..20).filter(|_| grill.take_beverage("uncle")).count();
        assert_eq!(taken as u32, BEVERAGE_CAPACITY);
        assert_eq!(sink.count_containing("cooler empty"), 5);
    }

    #[tokio::test]
    async fn test_single_pair_of_tongs() {
        let (grill, _) = grill();
        assert!(grill.use_utensil("cook"));
        assert!(!grill.use_utensil("uncle"));
        grill.return_utensil("cook");
        assert!(grill.use_utensil("uncle"));
    }

    #[tokio::test]
    async fn test_seasoning_permits() {
        let (grill, _) = grill();
        let permits: Vec<_> = (0..5).filter_map(|_| grill.use_seasoning("grandma")).collect();
        assert_eq!(permits.len(), 3);
        drop(permits);
        assert_eq!(grill.pools().seasoning.available(), SEASONING_CAPACITY);
    }

    #[test]
    fn test_charcoal_never_goes_negative() {
        let sink = Arc::new(RecordingSink::new());
        let grill = Grill::new(Roster::family(), sink);
        assert_eq!(grill.burn_charcoal(60), 40);
        assert_eq!(grill.burn_charcoal(60), 0);
        assert_eq!(grill.charcoal(), 0);
    }
}
