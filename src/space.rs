// src/space.rs
//
// Mixed-radix indexing of the multi-dimensional state grid.
//
// Every state is an ordered tuple of bounded non-negative integers, one per
// dimension. The indexer maps tuples to a linear id and back using exclusive
// prefix products of the per-dimension sizes, so the whole grid can be swept
// as a flat `0..n_states` range.

use crate::types::StateId;

/// Bijective mapping between grid coordinates and linear state ids.
#[derive(Debug, Clone)]
pub struct StateSpace {
    sizes: Vec<usize>,
    ex_pfx_product: Vec<usize>,
    n_states: usize,
}

impl StateSpace {
    /// Build the indexer for the given per-dimension cardinalities.
    ///
    /// Panics if `sizes` is empty or any dimension has size zero.
    pub fn new(sizes: &[usize]) -> Self {
        assert!(!sizes.is_empty(), "state space needs at least one dimension");
        assert!(
            sizes.iter().all(|&s| s > 0),
            "every dimension must have non-zero cardinality"
        );

        let mut ex_pfx_product = vec![1usize; sizes.len()];
        for d in 1..sizes.len() {
            ex_pfx_product[d] = ex_pfx_product[d - 1] * sizes[d - 1];
        }
        let n_states = ex_pfx_product[sizes.len() - 1] * sizes[sizes.len() - 1];

        Self {
            sizes: sizes.to_vec(),
            ex_pfx_product,
            n_states,
        }
    }

    /// Number of dimensions of the grid.
    pub fn dimensions(&self) -> usize {
        self.sizes.len()
    }

    /// Per-dimension cardinalities.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total number of states (product of all cardinalities).
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Linearize grid coordinates into a state id.
    ///
    /// Out-of-range coordinates are a caller bug: this fails loudly rather
    /// than wrapping, so a bad transition function cannot silently alias
    /// another state's slot.
    pub fn encode(&self, state: &[usize]) -> StateId {
        assert_eq!(state.len(), self.sizes.len(), "state dimensionality mismatch");
        let mut id = 0usize;
        for (d, &coordinate) in state.iter().enumerate() {
            assert!(
                coordinate < self.sizes[d],
                "coordinate {coordinate} out of range for dimension {d} (size {})",
                self.sizes[d]
            );
            id += coordinate * self.ex_pfx_product[d];
        }
        id
    }

    /// Recover grid coordinates from a state id.
    pub fn decode(&self, id: StateId) -> Vec<usize> {
        assert!(id < self.n_states, "state id {id} out of range");
        self.sizes
            .iter()
            .zip(&self.ex_pfx_product)
            .map(|(&size, &weight)| (id / weight) % size)
            .collect()
    }
}
