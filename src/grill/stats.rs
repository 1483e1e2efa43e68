//! Counters and the end-of-run snapshot.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{CookState, Roster};

/// Monotonic counters, safe to bump from any task without the grill lock.
#[derive(Debug, Default)]
pub struct GrillStats {
    thefts: AtomicU64,
    interventions: AtomicU64,
    seasonings: AtomicU64,
    conflicts: AtomicU64,
}

impl GrillStats {
    pub fn record_theft(&self) {
        self.thefts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_intervention(&self) {
        self.interventions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_seasoning(&self) {
        self.seasonings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            thefts: self.thefts.load(Ordering::Relaxed),
            interventions: self.interventions.load(Ordering::Relaxed),
            seasonings: self.seasonings.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub thefts: u64,
    pub interventions: u64,
    pub seasonings: u64,
    pub conflicts: u64,
}

/// Where one piece stands at the moment of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    pub name: String,
    pub state: CookState,
    pub cook_ticks: u32,
    pub stolen: bool,
    pub seasoned: bool,
}

/// Counters plus the per-item picture, for end-of-run reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stats: StatsSnapshot,
    pub items: Vec<ItemReport>,
    pub charcoal: u32,
}

impl Snapshot {
    pub(crate) fn capture(stats: StatsSnapshot, roster: &Roster, charcoal: u32) -> Self {
        let items = roster
            .iter()
            .map(|item| ItemReport {
                name: item.name().to_string(),
                state: item.state(),
                cook_ticks: item.cook_ticks(),
                stolen: item.is_stolen(),
                seasoned: item.is_seasoned(),
            })
            .collect();
        Self { stats, items, charcoal }
    }

    /// Pieces currently in `state`, stolen ones counted by their last state.
    pub fn count_in(&self, state: CookState) -> usize {
        self.items.iter().filter(|i| i.state == state).count()
    }

    pub fn stolen(&self) -> usize {
        self.items.iter().filter(|i| i.stolen).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let stats = GrillStats::default();
        stats.record_theft();
        stats.record_conflict();
        stats.record_conflict();
        stats.record_seasoning();
        assert_eq!(
            stats.snapshot(),
            StatsSnapshot { thefts: 1, interventions: 0, seasonings: 1, conflicts: 2 }
        );
    }

    #[test]
    fn test_snapshot_counts_every_item() {
        let snapshot = Snapshot::capture(StatsSnapshot::default(), &Roster::family(), 100);
        assert_eq!(snapshot.items.len(), 7);
        assert_eq!(snapshot.count_in(CookState::Raw), 7);
        assert_eq!(snapshot.stolen(), 0);
    }
}
