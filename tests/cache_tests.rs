// tests/cache_tests.rs
//
// Recompute-avoidance cache behaviour: exact hit/miss accounting on a
// deterministic chain world, the counter identity on the goal grid, and a
// fuzzed soundness property — point sets that differ only in dominated
// points must produce identical pruned hulls, because the whole hull
// construction is driven by the non-dominated projection alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use chvi::pareto::point_cmp;
use chvi::{
    convex_hull, non_dominated, Environment, GoalEnv, NoopSink, Point, Solver, SolverConfig,
    Termination,
};

/// Three states on a line; the only action walks right into the absorbing
/// end state with a fixed reward.
struct Chain;

impl Environment for Chain {
    fn state_space_size(&self) -> &[usize] {
        &[3]
    }
    fn action_space_size(&self) -> usize {
        1
    }
    fn execute_action(&self, state: &[usize], _action: usize) -> (Vec<usize>, Point) {
        (vec![(state[0] + 1).min(2)], vec![2.0, 1.0])
    }
    fn is_terminal(&self, state: &[usize]) -> bool {
        state[0] == 2
    }
}

#[test]
fn chain_world_hit_and_miss_accounting_is_exact() {
    let solver = Solver::new(&Chain, SolverConfig::default()).unwrap();
    let report = solver.run(&mut NoopSink);

    // sweep 1: both non-terminal states miss (cold cache);
    // sweep 2: state 0 sees a new projection (miss), state 1 still feeds off
    // the empty terminal hull (hit), and the vertex count stabilises
    assert_eq!(report.termination, Termination::Converged);
    assert_eq!(report.iterations, 2);
    assert_eq!(report.cache.misses, 3);
    assert_eq!(report.cache.hits, 1);

    assert_eq!(report.hulls[0], vec![vec![4.0, 2.0]]);
    assert_eq!(report.hulls[1], vec![vec![2.0, 1.0]]);
    assert!(report.hulls[2].is_empty());
}

#[test]
fn every_non_terminal_state_is_counted_once_per_sweep() {
    let env = GoalEnv::new(&[4, 4], 21, 0.1);
    let cfg = SolverConfig {
        max_iterations: 50,
        epsilon: 0.0,
        ..SolverConfig::default()
    };
    let report = Solver::new(&env, cfg).unwrap().run(&mut NoopSink);

    let non_terminal = (16 - env.n_goals()) as u64;
    assert_eq!(
        report.cache.hits + report.cache.misses,
        report.iterations as u64 * non_terminal
    );
}

#[test]
fn disabling_the_cache_leaves_the_counters_untouched() {
    let env = GoalEnv::new(&[3, 3], 4, 0.2);
    let cfg = SolverConfig {
        use_cache: false,
        max_iterations: 20,
        epsilon: 0.0,
        ..SolverConfig::default()
    };
    let report = Solver::new(&env, cfg).unwrap().run(&mut NoopSink);
    assert_eq!(report.cache.hits, 0);
    assert_eq!(report.cache.misses, 0);
}

fn pruned_hull(points: &[Point]) -> Vec<Point> {
    let mut hull = non_dominated(&convex_hull(&non_dominated(points)));
    hull.sort_by(|a, b| point_cmp(a, b));
    hull
}

#[test]
fn dominated_points_never_change_the_pruned_hull() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..200 {
        let dim = if rng.gen_bool(0.5) { 2 } else { 3 };
        let n = rng.gen_range(3..10);
        let base: Vec<Point> = (0..n)
            .map(|_| (0..dim).map(|_| rng.gen_range(0..9) as f64).collect())
            .collect();

        // shadow points sit coordinate-wise at or below an existing point,
        // strictly below somewhere, so the non-dominated projection of the
        // augmented set is unchanged
        let mut augmented = base.clone();
        for _ in 0..rng.gen_range(1..5) {
            let donor: &Point = &base[rng.gen_range(0..base.len())];
            let axis = rng.gen_range(0..dim);
            let shadow: Point = donor
                .iter()
                .enumerate()
                .map(|(d, &c)| {
                    let drop = if d == axis {
                        rng.gen_range(1..3)
                    } else {
                        rng.gen_range(0..3)
                    };
                    c - drop as f64
                })
                .collect();
            augmented.push(shadow);
        }

        assert_eq!(
            pruned_hull(&base),
            pruned_hull(&augmented),
            "base {base:?} augmented {augmented:?}"
        );
    }
}
