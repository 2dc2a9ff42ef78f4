// src/cache.rs
//
// Recompute-avoidance cache for the per-state hull construction.
//
// Each state remembers the non-dominated projection of its candidate union
// as of the last time its hull was actually recomputed. When the projection
// comes back unchanged in a later sweep the hull is guaranteed unchanged
// too, so the previous hull can be reused without touching the hull code.
// Slots are partitioned by state id (one task per slot, no locking); only
// the hit/miss counters are shared, and those are atomics scoped to a run.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::types::Point;

/// Per-state memo of the last projection used for a full recompute.
#[derive(Debug)]
pub struct RecomputeCache {
    slots: Vec<Option<Vec<Point>>>,
}

impl RecomputeCache {
    pub fn new(n_states: usize) -> Self {
        let mut slots = Vec::with_capacity(n_states);
        slots.resize_with(n_states, || None);
        Self { slots }
    }

    pub fn n_states(&self) -> usize {
        self.slots.len()
    }

    /// Mutable access to every slot, for the parallel sweep to partition.
    pub fn slots_mut(&mut self) -> &mut [Option<Vec<Point>>] {
        &mut self.slots
    }
}

/// Hit/miss counters for one solver run.
///
/// Owned by the run and returned with its report; there is no process-wide
/// counter state.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CacheCounters {
        CacheCounters {
            hits: self.hits(),
            misses: self.misses(),
        }
    }
}

/// Plain-value snapshot of the counters, for reports and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
}
