//! Surfaces: zones rasterized onto the shared grid, and their comparison.
//!
//! A [`Surface`] is derived data — recomputed from a zone model per query,
//! never mutated once produced. All three surfaces in a query share one
//! [`ZoneGrid`], which is what makes the cell-wise statistics in
//! [`compare`] meaningful.
//!
//! The 0.5 mask threshold reads differently per variant: a *probability*
//! cutoff for fixed/called surfaces, a *fraction-of-peak density* cutoff
//! for swing surfaces (the grid evaluator normalizes those to peak 1).

mod compare;
mod grid;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use compare::{centroid, divergence, iou, Centroid, MASK_THRESHOLD};
pub use grid::{GridSpec, ZoneGrid};

/// A zone evaluated at every grid cell, stored `[n_z, n_x]` (row per
/// height), all values in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    values: Array2<f64>,
}

impl Surface {
    /// Wrap rasterized values. Use [`ZoneGrid::surface`] to produce them.
    pub fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// The cell values, `[n_z, n_x]`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Row-major nested vectors for callers serializing to rendering
    /// formats.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .outer_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}
