// src/config.rs
//
// Solver configuration.
//
// Kept deliberately small: everything about the MDP itself lives in the
// environment, so the config only carries the value-iteration knobs. All
// validation happens up front — a bad parameter must be rejected before the
// first sweep starts.

use anyhow::{bail, Result};

/// Knobs for one convex-hull value-iteration run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Discount factor applied to successor hulls (`> 0`, typically `<= 1`).
    pub discount_factor: f64,
    /// Hard cap on the number of sweeps.
    pub max_iterations: usize,
    /// Relative vertex-count delta at or below which the run converges.
    pub epsilon: f64,
    /// Whether the recompute-avoidance cache is enabled.
    pub use_cache: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount_factor: 1.0,
            max_iterations: 100,
            epsilon: 0.0,
            use_cache: true,
        }
    }
}

impl SolverConfig {
    /// Reject invalid parameter combinations before any iteration runs.
    pub fn validate(&self) -> Result<()> {
        if !self.discount_factor.is_finite() || self.discount_factor <= 0.0 {
            bail!(
                "discount factor must be positive and finite, got {}",
                self.discount_factor
            );
        }
        if self.max_iterations == 0 {
            bail!("max iterations must be at least 1");
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            bail!("epsilon must be non-negative and finite, got {}", self.epsilon);
        }
        Ok(())
    }
}
