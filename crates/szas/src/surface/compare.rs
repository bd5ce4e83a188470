//! Pairwise surface statistics: overlap, divergence, centroid.

use serde::{Deserialize, Serialize};

use crate::surface::{Surface, ZoneGrid};

/// Cells at or above this value belong to a surface's mask.
///
/// For fixed/called surfaces this is a probability cutoff; for swing
/// surfaces (already peak-normalized by the grid evaluator) it is a
/// fraction-of-maximum cutoff. Same number, different references.
pub const MASK_THRESHOLD: f64 = 0.5;

/// Probability-weighted mean position of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub z: f64,
}

/// Intersection-over-union of the two thresholded masks.
///
/// Defined as 0 when neither surface clears the threshold anywhere.
pub fn iou(a: &Surface, b: &Surface, threshold: f64) -> f64 {
    debug_assert_eq!(a.values().dim(), b.values().dim());

    let mut intersection = 0usize;
    let mut union = 0usize;
    for (&va, &vb) in a.values().iter().zip(b.values().iter()) {
        let in_a = va >= threshold;
        let in_b = vb >= threshold;
        if in_a && in_b {
            intersection += 1;
        }
        if in_a || in_b {
            union += 1;
        }
    }

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Mean absolute cell-wise difference between two surfaces.
pub fn divergence(a: &Surface, b: &Surface) -> f64 {
    debug_assert_eq!(a.values().dim(), b.values().dim());

    let n = a.values().len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = a
        .values()
        .iter()
        .zip(b.values().iter())
        .map(|(&va, &vb)| (va - vb).abs())
        .sum();
    total / n as f64
}

/// Probability-weighted centroid of a surface on its grid.
///
/// A zero-mass surface has no centroid: the result is `None`, never a
/// coerced origin.
pub fn centroid(surface: &Surface, grid: &ZoneGrid) -> Option<Centroid> {
    debug_assert_eq!(surface.values().dim(), grid.shape());

    let mut mass = 0.0;
    let mut x_sum = 0.0;
    let mut z_sum = 0.0;
    for (iz, &z) in grid.zs().iter().enumerate() {
        for (ix, &x) in grid.xs().iter().enumerate() {
            let w = surface.values()[[iz, ix]];
            mass += w;
            x_sum += w * x;
            z_sum += w * z;
        }
    }

    if mass == 0.0 {
        return None;
    }
    Some(Centroid {
        x: x_sum / mass,
        z: z_sum / mass,
    })
}
