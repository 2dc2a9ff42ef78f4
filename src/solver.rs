// src/solver.rs
//
// The fixed-point iteration engine.
//
// Each generation sweeps the whole state space in parallel: every state
// builds a candidate point set from its actions' discounted successor hulls,
// prunes it to convex-hull vertices and the non-dominated front, and writes
// the result into its own slot of the next table. Generations are separated
// by a full barrier (the end of the parallel iterator) and the table is
// swapped wholesale, so tasks only ever read the frozen previous generation.
//
// Convergence uses the total vertex count as a cheap proxy for "how much
// changed": the run stops once the per-state change in vertex count drops
// to epsilon. This does not bound actual value movement — it is the
// criterion the algorithm has always used, kept as observed behaviour and
// surfaced per generation through the progress sink.

use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;

use crate::cache::{CacheCounters, CacheStats, RecomputeCache};
use crate::config::SolverConfig;
use crate::env::Environment;
use crate::hull::convex_hull;
use crate::logging::{GenerationRecord, ProgressSink};
use crate::pareto::{canonicalize, non_dominated};
use crate::space::StateSpace;
use crate::types::{Point, Termination};
use crate::value::{Hull, ValueTable};

/// Final result of a solver run.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Pareto hull per state, indexed by state id.
    pub hulls: Vec<Hull>,
    /// Number of sweeps actually executed.
    pub iterations: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Vertex count of the final table.
    pub total_vertices: usize,
    /// Recompute-cache counters for this run.
    pub cache: CacheCounters,
}

/// Convex-hull value iteration over one environment.
pub struct Solver<'e, E: Environment> {
    env: &'e E,
    space: StateSpace,
    cfg: SolverConfig,
}

impl<'e, E: Environment> Solver<'e, E> {
    /// Build a solver for `env`, rejecting invalid configuration up front.
    pub fn new(env: &'e E, cfg: SolverConfig) -> Result<Self> {
        cfg.validate()?;
        let space = StateSpace::new(env.state_space_size());
        Ok(Self { env, space, cfg })
    }

    /// The state indexer this solver sweeps over.
    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    /// Run value iteration to convergence or the iteration cap.
    pub fn run(&self, sink: &mut dyn ProgressSink) -> SolveReport {
        let n_states = self.space.n_states();
        let mut table = ValueTable::new(n_states);
        let mut cache = RecomputeCache::new(n_states);
        let stats = CacheStats::default();

        let mut previous_delta = 0usize;
        let mut iteration = 0usize;

        let termination = loop {
            iteration += 1;
            let sweep_start = Instant::now();
            let next = self.sweep(table.hulls(), &mut cache, &stats);
            table.swap_in(next);

            let delta = table.total_vertices();
            let relative_delta =
                (delta as f64 - previous_delta as f64).abs() / n_states as f64;
            sink.log_generation(&GenerationRecord {
                iteration,
                max_iterations: self.cfg.max_iterations,
                relative_delta,
                total_vertices: delta,
                sweep_ms: sweep_start.elapsed().as_secs_f64() * 1e3,
                cache: stats.snapshot(),
            });

            if relative_delta <= self.cfg.epsilon {
                break Termination::Converged;
            }
            if iteration >= self.cfg.max_iterations {
                break Termination::IterationLimit;
            }
            previous_delta = delta;
        };

        let total_vertices = table.total_vertices();
        SolveReport {
            hulls: table.into_hulls(),
            iterations: iteration,
            termination,
            total_vertices,
            cache: stats.snapshot(),
        }
    }

    /// One full generation: every state id in parallel, each task writing
    /// only its own table slot and cache slot.
    fn sweep(
        &self,
        prev: &[Hull],
        cache: &mut RecomputeCache,
        stats: &CacheStats,
    ) -> Vec<Hull> {
        cache
            .slots_mut()
            .par_iter_mut()
            .enumerate()
            .map(|(id, slot)| {
                let state = self.space.decode(id);
                if self.env.is_terminal(&state) {
                    // absorbing: the hull fixed at initialization is carried
                    // forward unchanged
                    return prev[id].clone();
                }
                let union = self.union_set(&state, prev);
                if self.cfg.use_cache {
                    self.hull_with_cache(union, slot, &prev[id], stats)
                } else {
                    non_dominated(&convex_hull(&union))
                }
            })
            .collect()
    }

    /// Candidate point set for one state: the union over all actions of the
    /// discounted, reward-shifted successor hulls, in canonical set form.
    ///
    /// An empty successor hull contributes only the immediate reward, so an
    /// uninformed successor never erases the reward signal.
    fn union_set(&self, state: &[usize], prev: &[Hull]) -> Vec<Point> {
        let gamma = self.cfg.discount_factor;
        let mut union: Vec<Point> = Vec::new();
        for action in 0..self.env.action_space_size() {
            let (next_state, reward) = self.env.execute_action(state, action);
            let successor = &prev[self.space.encode(&next_state)];
            if successor.is_empty() {
                union.push(reward);
            } else {
                for p in successor {
                    union.push(
                        p.iter()
                            .zip(&reward)
                            .map(|(value, r)| gamma * value + r)
                            .collect(),
                    );
                }
            }
        }
        canonicalize(union)
    }

    /// Hull construction behind the recompute-avoidance cache.
    ///
    /// The convex-hull vertex set of the union is fully determined by its
    /// non-dominated projection, so when the projection matches the one
    /// memoized at the last real recompute, the previous generation's hull
    /// is reused as-is. On a miss the hull is rebuilt from the projection,
    /// with a final dominance filter guarding the degenerate-geometry
    /// fallback inside `convex_hull`.
    fn hull_with_cache(
        &self,
        union: Vec<Point>,
        slot: &mut Option<Vec<Point>>,
        previous: &Hull,
        stats: &CacheStats,
    ) -> Hull {
        let projection = non_dominated(&union);
        if slot.as_ref() == Some(&projection) {
            stats.record_hit();
            return previous.clone();
        }
        stats.record_miss();
        let hull = non_dominated(&convex_hull(&projection));
        *slot = Some(projection);
        hull
    }
}
