// src/types.rs
//
// Common shared types for the CHVI solver.

use serde::Serialize;

/// A point in objective space: one f64 per objective.
///
/// The same representation is used for immediate reward vectors and for
/// discounted-return vectors; the solver never distinguishes the two.
pub type Point = Vec<f64>;

/// Linear index of a state in `[0, n_states)`.
pub type StateId = usize;

/// Why a solver run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// The relative vertex-count delta dropped to `epsilon` or below.
    Converged,
    /// The sweep count reached `max_iterations` without converging.
    IterationLimit,
}
