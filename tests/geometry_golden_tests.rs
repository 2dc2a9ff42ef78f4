// tests/geometry_golden_tests.rs
//
// Literal golden-output regression tests for the geometric collaborators,
// pinned on a fixed 13-point three-dimensional example. The expected sets
// were computed once with exact rational arithmetic and must never drift.

use chvi::pareto::point_cmp;
use chvi::{convex_hull, non_dominated};

fn worked_example() -> Vec<Vec<f64>> {
    [
        [0.0, 0.0, 4.0],
        [0.0, 5.0, 3.0],
        [1.0, 7.0, 0.0],
        [2.0, 1.0, 4.0],
        [3.0, 4.0, 5.0],
        [4.0, 2.0, 3.0],
        [4.0, 4.0, 6.0],
        [4.0, 6.0, 7.0],
        [5.0, 0.0, 2.0],
        [6.0, 4.0, 1.0],
        [6.0, 5.0, 1.0],
        [6.0, 7.0, 0.0],
        [7.0, 4.0, 3.0],
    ]
    .iter()
    .map(|p| p.to_vec())
    .collect()
}

fn as_sorted_set(mut points: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    points.sort_by(|a, b| point_cmp(a, b));
    points
}

#[test]
fn non_dominated_front_of_the_worked_example() {
    let front = as_sorted_set(non_dominated(&worked_example()));
    let expected = as_sorted_set(vec![
        vec![4.0, 6.0, 7.0],
        vec![6.0, 5.0, 1.0],
        vec![6.0, 7.0, 0.0],
        vec![7.0, 4.0, 3.0],
    ]);
    assert_eq!(front, expected);
}

#[test]
fn convex_hull_of_the_worked_example() {
    let hull = as_sorted_set(convex_hull(&worked_example()));
    let expected = as_sorted_set(vec![
        vec![0.0, 0.0, 4.0],
        vec![0.0, 5.0, 3.0],
        vec![1.0, 7.0, 0.0],
        vec![4.0, 4.0, 6.0],
        vec![4.0, 6.0, 7.0],
        vec![5.0, 0.0, 2.0],
        vec![6.0, 4.0, 1.0],
        vec![6.0, 7.0, 0.0],
        vec![7.0, 4.0, 3.0],
    ]);
    assert_eq!(hull, expected);
}

#[test]
fn interior_points_of_the_worked_example_are_dropped() {
    let hull = convex_hull(&worked_example());
    for interior in [
        vec![2.0, 1.0, 4.0],
        vec![3.0, 4.0, 5.0],
        vec![4.0, 2.0, 3.0],
        vec![6.0, 5.0, 1.0],
    ] {
        assert!(!hull.contains(&interior), "{interior:?} should not be a vertex");
    }
}

#[test]
fn hull_is_idempotent_on_the_worked_example() {
    let once = convex_hull(&worked_example());
    let twice = convex_hull(&once);
    assert_eq!(as_sorted_set(once), as_sorted_set(twice));
}

#[test]
fn pruning_pipeline_keeps_only_non_dominated_vertices() {
    // the hull keeps lower corners like (0, 0, 4); the dominance filter on
    // top of it must strip them
    let pruned = as_sorted_set(non_dominated(&convex_hull(&worked_example())));
    let expected = as_sorted_set(vec![
        vec![4.0, 6.0, 7.0],
        vec![6.0, 7.0, 0.0],
        vec![7.0, 4.0, 3.0],
    ]);
    assert_eq!(pruned, expected);
}
