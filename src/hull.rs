// src/hull.rs
//
// Convex-hull vertex extraction over small point sets.
//
// The solver only needs the vertex subset of the input, never facets, so the
// hull is computed point-by-point: a point is a vertex exactly when it is
// not a convex combination of the remaining points, and that membership
// question is a small phase-1 simplex feasibility problem. Degenerate input
// (fewer than dim + 1 affinely independent points) is returned unchanged —
// the caller must never observe a hull failure.

use crate::pareto::canonicalize;
use crate::types::Point;

const EPS: f64 = 1e-9;

/// Vertices of the convex hull of `points`, in canonical set order.
///
/// Input is treated as a set (duplicates collapse). Inputs of size zero or
/// one, and degenerate inputs whose affine span is lower-dimensional than
/// the points themselves, are returned unchanged.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let set = canonicalize(points.to_vec());
    if set.len() <= 1 {
        return set;
    }
    let dim = set[0].len();
    if affine_rank(&set) < dim {
        return set;
    }

    let mut vertices = Vec::with_capacity(set.len());
    let mut others: Vec<Point> = Vec::with_capacity(set.len() - 1);
    for (idx, candidate) in set.iter().enumerate() {
        others.clear();
        others.extend(set.iter().take(idx).cloned());
        others.extend(set.iter().skip(idx + 1).cloned());
        if !in_convex_hull(candidate, &others) {
            vertices.push(candidate.clone());
        }
    }
    vertices
}

/// Rank of the affine span of `points` (0 for a single point, up to the
/// point dimensionality for a full-dimensional set).
fn affine_rank(points: &[Point]) -> usize {
    if points.len() <= 1 {
        return 0;
    }
    let ncols = points[0].len();
    let base = &points[0];
    let mut rows: Vec<Vec<f64>> = points[1..]
        .iter()
        .map(|p| p.iter().zip(base.iter()).map(|(a, b)| a - b).collect())
        .collect();

    let mut rank = 0;
    let mut row = 0;
    for col in 0..ncols {
        // partial pivoting keeps the elimination stable on scaled inputs
        let mut pivot = None;
        let mut best = EPS;
        for r in row..rows.len() {
            if rows[r][col].abs() > best {
                best = rows[r][col].abs();
                pivot = Some(r);
            }
        }
        let Some(pivot) = pivot else { continue };
        rows.swap(row, pivot);
        let pivot_value = rows[row][col];
        for r in 0..rows.len() {
            if r != row && rows[r][col] != 0.0 {
                let factor = rows[r][col] / pivot_value;
                for c in col..ncols {
                    rows[r][c] -= factor * rows[row][c];
                }
            }
        }
        rank += 1;
        row += 1;
        if row == rows.len() {
            break;
        }
    }
    rank
}

/// Whether `target` lies in the convex hull of `points`.
///
/// Solves the feasibility problem "find lambda >= 0 with sum(lambda) = 1 and
/// sum(lambda_i * p_i) = target" by a phase-1 simplex over a dense tableau.
/// Bland's rule plus a pivot cap guard against cycling; if the cap is hit
/// the point is conservatively treated as outside (kept as a vertex).
fn in_convex_hull(target: &[f64], points: &[Point]) -> bool {
    let m = points.len();
    if m == 0 {
        return false;
    }
    let dim = target.len();
    let rows = dim + 1; // one equality per coordinate plus the sum-to-one row
    let cols = m + rows; // lambdas plus one artificial per row

    let mut tableau = vec![vec![0.0f64; cols + 1]; rows];
    for (j, p) in points.iter().enumerate() {
        for i in 0..dim {
            tableau[i][j] = p[i];
        }
        tableau[dim][j] = 1.0;
    }
    for i in 0..dim {
        tableau[i][cols] = target[i];
    }
    tableau[dim][cols] = 1.0;

    // simplex needs non-negative right-hand sides
    for row in tableau.iter_mut() {
        if row[cols] < 0.0 {
            for value in row.iter_mut() {
                *value = -*value;
            }
        }
    }

    // artificial variables form the initial basis
    let mut basis: Vec<usize> = Vec::with_capacity(rows);
    for (i, row) in tableau.iter_mut().enumerate() {
        row[m + i] = 1.0;
        basis.push(m + i);
    }

    // reduced-cost row for "minimise the sum of artificials"
    let mut z = vec![0.0f64; cols + 1];
    for row in &tableau {
        for (zj, value) in z.iter_mut().zip(row.iter()) {
            *zj += value;
        }
    }
    for i in 0..rows {
        z[m + i] -= 1.0;
    }

    let max_pivots = 50 * (cols + 1);
    for _ in 0..max_pivots {
        // Bland's rule: smallest column index with positive reduced cost
        let Some(enter) = (0..cols).find(|&j| z[j] > EPS) else {
            break;
        };

        let mut leave: Option<usize> = None;
        let mut best = f64::INFINITY;
        for i in 0..rows {
            if tableau[i][enter] > EPS {
                let ratio = tableau[i][cols] / tableau[i][enter];
                let tie = ratio < best + EPS
                    && leave.map_or(true, |l| basis[i] < basis[l]);
                if ratio < best - EPS || tie {
                    best = ratio;
                    leave = Some(i);
                }
            }
        }
        // phase-1 objectives are bounded below; no leaving row means the
        // tableau has gone numerically bad, so keep the point
        let Some(leave) = leave else {
            return false;
        };

        let pivot_value = tableau[leave][enter];
        for value in tableau[leave].iter_mut() {
            *value /= pivot_value;
        }
        for i in 0..rows {
            if i != leave && tableau[i][enter] != 0.0 {
                let factor = tableau[i][enter];
                for j in 0..=cols {
                    tableau[i][j] -= factor * tableau[leave][j];
                }
            }
        }
        let factor = z[enter];
        if factor != 0.0 {
            for j in 0..=cols {
                z[j] -= factor * tableau[leave][j];
            }
        }
        basis[leave] = enter;
    }

    // feasible (target is a convex combination) iff all artificials hit zero
    z[cols] < EPS
}
