//! Convex-hull value iteration for multi-objective MDPs.
//!
//! This crate computes, for every state of a finite grid-structured MDP, the
//! Pareto-optimal set of achievable discounted vector-valued returns. The
//! binary (`src/main.rs`) is just a thin research harness around these
//! components.

pub mod cache;
pub mod config;
pub mod env;
pub mod hull;
pub mod logging;
pub mod pareto;
pub mod solver;
pub mod space;
pub mod types;
pub mod value;

// --- Re-exports for ergonomic external use ---------------------------------

pub use cache::{CacheCounters, CacheStats, RecomputeCache};
pub use config::SolverConfig;
pub use env::{Environment, GoalEnv, ScrambleEnv};
pub use hull::convex_hull;
pub use logging::{ConsoleSink, GenerationRecord, JsonlSink, NoopSink, ProgressSink};
pub use pareto::{non_dominated, weakly_dominates};
pub use solver::{SolveReport, Solver};
pub use space::StateSpace;
pub use types::{Point, StateId, Termination};
pub use value::{Hull, ValueTable};
