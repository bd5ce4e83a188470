//! Small dense linear algebra for Newton steps.
//!
//! The fitting code only ever solves tiny symmetric systems (at most 6×6:
//! one row per polynomial feature), so a pivoted Gauss–Jordan elimination is
//! all that is needed. Singularity is reported as `None` and mapped to a
//! degenerate-fit error by the caller.

use ndarray::{Array1, Array2, ArrayView2};

/// Relative pivot threshold below which a matrix is treated as singular.
const PIVOT_EPS: f64 = 1e-12;

/// Solve `a · x = b` for small dense `a` via Gauss–Jordan with partial
/// pivoting. Returns `None` when a pivot collapses (singular system).
pub fn solve(a: ArrayView2<'_, f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    // Augmented working copy [a | b].
    let mut work = Array2::<f64>::zeros((n, n + 1));
    work.slice_mut(ndarray::s![.., ..n]).assign(&a);
    work.column_mut(n).assign(b);

    gauss_jordan(&mut work, n)?;

    Some(work.column(n).to_owned())
}

/// Invert a small dense matrix. Returns `None` when singular.
pub fn invert(a: ArrayView2<'_, f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);

    // Augmented working copy [a | I].
    let mut work = Array2::<f64>::zeros((n, 2 * n));
    work.slice_mut(ndarray::s![.., ..n]).assign(&a);
    for i in 0..n {
        work[[i, n + i]] = 1.0;
    }

    gauss_jordan(&mut work, n)?;

    Some(work.slice(ndarray::s![.., n..]).to_owned())
}

/// Reduce the left `n` columns of `work` to the identity, applying the same
/// row operations to the remaining columns.
fn gauss_jordan(work: &mut Array2<f64>, n: usize) -> Option<()> {
    let cols = work.ncols();

    for col in 0..n {
        // Partial pivot: largest magnitude on or below the diagonal.
        let pivot_row = (col..n).max_by(|&i, &j| {
            work[[i, col]]
                .abs()
                .partial_cmp(&work[[j, col]].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

        let pivot = work[[pivot_row, col]];
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPS {
            return None;
        }

        if pivot_row != col {
            for c in 0..cols {
                work.swap([pivot_row, c], [col, c]);
            }
        }

        for c in 0..cols {
            work[[col, c]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for c in 0..cols {
                let sub = factor * work[[col, c]];
                work[[row, c]] -= sub;
            }
        }
    }

    Some(())
}
