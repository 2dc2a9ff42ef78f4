// src/pareto.rs
//
// Pareto dominance and the non-dominated front, maximization convention.
//
// All objective vectors in the solver are compared assuming "larger is
// better". Dominance is weak: p dominates q when p is at least as large in
// every objective and strictly larger in at least one. Equal points never
// dominate each other, so duplicates must be collapsed before filtering —
// both geometric operations treat their input as a set.

use std::cmp::Ordering;

use crate::types::Point;

/// Lexicographic total order on points, used for canonical set form.
pub fn point_cmp(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Sort into lexicographic order and drop exact duplicates.
///
/// Every point set flowing through the solver (candidate unions, cache
/// projections, hulls) is kept in this canonical form so that set equality
/// reduces to `Vec` equality.
pub fn canonicalize(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| point_cmp(a, b));
    points.dedup_by(|a, b| point_cmp(a, b) == Ordering::Equal);
    points
}

/// True if `p` weakly dominates `q`: `p[i] >= q[i]` for every objective,
/// with strict inequality in at least one.
pub fn weakly_dominates(p: &[f64], q: &[f64]) -> bool {
    debug_assert_eq!(p.len(), q.len());
    let mut strictly_better = false;
    for (a, b) in p.iter().zip(q.iter()) {
        if a < b {
            return false;
        }
        if a > b {
            strictly_better = true;
        }
    }
    strictly_better
}

/// The subset of `points` not weakly dominated by any other member.
///
/// Inputs of size zero or one are returned unchanged. Duplicates collapse.
/// Output order is canonical but callers must only rely on membership.
pub fn non_dominated(points: &[Point]) -> Vec<Point> {
    if points.len() <= 1 {
        return points.to_vec();
    }
    let set = canonicalize(points.to_vec());
    set.iter()
        .filter(|p| !set.iter().any(|q| weakly_dominates(q, p.as_slice())))
        .cloned()
        .collect()
}
