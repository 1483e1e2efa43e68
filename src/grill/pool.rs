//! Capacity-limited, non-blocking resource counters.

use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Beer on ice at the start of the run.
pub const BEVERAGE_CAPACITY: u32 = 15;
/// There is exactly one good pair of tongs.
pub const UTENSIL_CAPACITY: u32 = 1;
/// Salt, chimichurri, and so on: three people can season at once.
pub const SEASONING_CAPACITY: u32 = 3;

/// A counting semaphore without a wait queue.
///
/// [`try_acquire`](Self::try_acquire) either takes a unit immediately or
/// fails with no side effect. [`release`](Self::release) saturates at
/// capacity, so `0 <= available <= capacity` holds under any interleaving.
#[derive(Debug)]
pub struct ResourcePool {
    name: &'static str,
    capacity: u32,
    available: AtomicU32,
}

impl ResourcePool {
    pub fn new(name: &'static str, capacity: u32) -> Self {
        Self {
            name,
            capacity,
            available: AtomicU32::new(capacity),
        }
    }

    pub fn available(&self) -> u32 {
        self.available.load(Ordering::Acquire)
    }

    /// Takes one unit if any is left.
    pub fn try_acquire(&self) -> bool {
        let taken = self
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok();
        if !taken {
            trace!(pool = self.name, capacity = self.capacity, "Pool exhausted");
        }
        taken
    }

    /// Returns one unit. Only call after a successful `try_acquire`.
    pub fn release(&self) {
        let capacity = self.capacity;
        let _ = self
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < capacity).then_some(n + 1));
    }

    /// Takes one unit and returns it when the permit drops.
    pub fn try_permit(&self) -> Option<PoolPermit<'_>> {
        self.try_acquire().then_some(PoolPermit { pool: self })
    }
}

/// A unit held from a [`ResourcePool`], released on drop.
#[derive(Debug)]
pub struct PoolPermit<'a> {
    pool: &'a ResourcePool,
}

impl Drop for PoolPermit<'_> {
    fn drop(&mut self) {
        self.pool.release();
    }
}

/// The three pools the family shares.
#[derive(Debug)]
pub struct Pools {
    pub beverage: ResourcePool,
    pub utensil: ResourcePool,
    pub seasoning: ResourcePool,
}

impl Default for Pools {
    fn default() -> Self {
        Self {
            beverage: ResourcePool::new("beverage", BEVERAGE_CAPACITY),
            utensil: ResourcePool::new("utensil", UTENSIL_CAPACITY),
            seasoning: ResourcePool::new("seasoning", SEASONING_CAPACITY),
        }
    }
}
