// src/env.rs
//
// Environment collaborators for the solver.
//
// The solver only ever asks an environment four things: how big the state
// grid is, how many actions exist, what a single (state, action) transition
// yields, and whether a state is terminal. Transitions are pure functions of
// their arguments so one environment value can be shared read-only across
// the parallel sweep. Terminal states are absorbing: the solver never
// evaluates their Q-function and their hull stays at its initial value.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::Point;

/// Capability set the solver requires from an environment.
pub trait Environment: Sync {
    /// Per-dimension cardinalities of the state grid.
    fn state_space_size(&self) -> &[usize];

    /// Number of discrete actions, `[0, action_space_size)`.
    fn action_space_size(&self) -> usize;

    /// Transition for one state/action pair: successor state plus the
    /// immediate reward vector (one entry per objective).
    fn execute_action(&self, state: &[usize], action: usize) -> (Vec<usize>, Point);

    /// Whether `state` is absorbing.
    fn is_terminal(&self, state: &[usize]) -> bool;
}

/// Grid world with randomly placed absorbing goal cells.
///
/// Actions move one step along a single dimension (action `2d` moves down,
/// `2d + 1` moves up, clipped at the grid bounds) and cost one unit of that
/// dimension's objective. Goal placement is a deterministic function of the
/// seed; the origin is never a goal so the default start state always has a
/// Q-function to evaluate.
#[derive(Debug, Clone)]
pub struct GoalEnv {
    sizes: Vec<usize>,
    n_actions: usize,
    goals: HashSet<Vec<usize>>,
}

impl GoalEnv {
    /// Place `max(1, goal_fraction * n_states)` goals using `seed`.
    ///
    /// Panics if the grid is empty or has fewer than two states (there must
    /// be room for at least one goal besides the origin).
    pub fn new(sizes: &[usize], seed: u64, goal_fraction: f64) -> Self {
        assert!(!sizes.is_empty(), "goal grid needs at least one dimension");
        assert!(sizes.iter().all(|&s| s > 0), "zero-size dimension");
        let n_states: usize = sizes.iter().product();
        assert!(n_states >= 2, "goal grid needs at least two states");

        let wanted = ((goal_fraction * n_states as f64) as usize).max(1);
        let n_goals = wanted.min(n_states - 1);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut goals = HashSet::with_capacity(n_goals);
        while goals.len() < n_goals {
            let goal: Vec<usize> = sizes.iter().map(|&s| rng.gen_range(0..s)).collect();
            if goal.iter().any(|&c| c != 0) {
                goals.insert(goal);
            }
        }

        Self {
            sizes: sizes.to_vec(),
            n_actions: 2 * sizes.len(),
            goals,
        }
    }

    /// Number of goal cells actually placed.
    pub fn n_goals(&self) -> usize {
        self.goals.len()
    }
}

impl Environment for GoalEnv {
    fn state_space_size(&self) -> &[usize] {
        &self.sizes
    }

    fn action_space_size(&self) -> usize {
        self.n_actions
    }

    fn execute_action(&self, state: &[usize], action: usize) -> (Vec<usize>, Point) {
        let dimension = action / 2;
        let mut next = state.to_vec();
        if action % 2 == 0 {
            next[dimension] = next[dimension].saturating_sub(1);
        } else {
            next[dimension] = (next[dimension] + 1).min(self.sizes[dimension] - 1);
        }
        let mut reward = vec![0.0; self.sizes.len()];
        reward[dimension] = -1.0;
        (next, reward)
    }

    fn is_terminal(&self, state: &[usize]) -> bool {
        self.goals.contains(state)
    }
}

/// Seed-scrambled walk used as a stress environment.
///
/// Every action yields the same successor — coordinate `d` maps to
/// `(seed * (d + 1) + state[d]^2) mod size[d]` — while the reward vector is
/// `state + action` per dimension. A state is terminal when any coordinate
/// sits at its upper bound.
#[derive(Debug, Clone)]
pub struct ScrambleEnv {
    sizes: Vec<usize>,
    n_actions: usize,
    seed: u64,
}

impl ScrambleEnv {
    pub fn new(sizes: &[usize], n_actions: usize, seed: u64) -> Self {
        assert!(!sizes.is_empty(), "scramble grid needs at least one dimension");
        assert!(sizes.iter().all(|&s| s > 0), "zero-size dimension");
        assert!(n_actions > 0, "need at least one action");
        Self {
            sizes: sizes.to_vec(),
            n_actions,
            seed,
        }
    }
}

impl Environment for ScrambleEnv {
    fn state_space_size(&self) -> &[usize] {
        &self.sizes
    }

    fn action_space_size(&self) -> usize {
        self.n_actions
    }

    fn execute_action(&self, state: &[usize], action: usize) -> (Vec<usize>, Point) {
        let next: Vec<usize> = state
            .iter()
            .enumerate()
            .map(|(d, &c)| {
                let mixed = self
                    .seed
                    .wrapping_mul(d as u64 + 1)
                    .wrapping_add((c * c) as u64);
                (mixed % self.sizes[d] as u64) as usize
            })
            .collect();
        let reward: Point = state.iter().map(|&c| (c + action) as f64).collect();
        (next, reward)
    }

    fn is_terminal(&self, state: &[usize]) -> bool {
        state
            .iter()
            .zip(&self.sizes)
            .any(|(&c, &size)| c + 1 == size)
    }
}
