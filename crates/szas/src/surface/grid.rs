//! The shared comparison grid.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;
use crate::zone::Zone;

/// Rectangular sampling window for zone rasterization.
///
/// One grid serves all three zones in a query regardless of which batter is
/// active, so the resulting surfaces are cell-for-cell comparable. The
/// default window covers the plate with a generous margin: x ∈ [−1.5, 1.5],
/// z ∈ [1.0, 4.5] feet at 50×50.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    /// Horizontal sample count.
    pub nx: usize,
    /// Vertical sample count.
    pub nz: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            x_min: -1.5,
            x_max: 1.5,
            z_min: 1.0,
            z_max: 4.5,
            nx: 50,
            nz: 50,
        }
    }
}

/// Evenly spaced sample coordinates realized from a [`GridSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGrid {
    xs: Array1<f64>,
    zs: Array1<f64>,
}

fn linspace(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    debug_assert!(n >= 2, "grid axis needs at least 2 samples");
    let step = (hi - lo) / (n - 1) as f64;
    Array1::from_iter((0..n).map(|i| lo + step * i as f64))
}

impl ZoneGrid {
    /// Realize the sample coordinates for a spec.
    pub fn new(spec: &GridSpec) -> Self {
        Self {
            xs: linspace(spec.x_min, spec.x_max, spec.nx),
            zs: linspace(spec.z_min, spec.z_max, spec.nz),
        }
    }

    /// Horizontal sample positions.
    pub fn xs(&self) -> &Array1<f64> {
        &self.xs
    }

    /// Vertical sample positions.
    pub fn zs(&self) -> &Array1<f64> {
        &self.zs
    }

    /// Grid shape as `(n_z, n_x)` — the surface storage layout.
    pub fn shape(&self) -> (usize, usize) {
        (self.zs.len(), self.xs.len())
    }

    /// Rasterize a zone onto the grid as a probability surface in [0, 1].
    ///
    /// Fixed and called zones already evaluate to probabilities. A swing
    /// (density) zone is rescaled by its grid peak, so its cells read as
    /// fraction-of-maximum density — the 0.5 mask threshold then selects the
    /// 50 %-of-peak contour rather than a probability contour.
    pub fn surface(&self, zone: &Zone) -> Surface {
        self.surface_with_peak(zone).0
    }

    /// Like [`surface`](Self::surface), also returning the pre-normalization
    /// peak value (the raw density maximum for swing zones, the plain
    /// maximum otherwise).
    pub fn surface_with_peak(&self, zone: &Zone) -> (Surface, f64) {
        let (nz, nx) = self.shape();
        let mut values = Array2::<f64>::zeros((nz, nx));
        for (iz, &z) in self.zs.iter().enumerate() {
            for (ix, &x) in self.xs.iter().enumerate() {
                values[[iz, ix]] = zone.evaluate(x, z);
            }
        }

        let peak = values.iter().fold(0.0f64, |acc, &v| acc.max(v));
        if zone.is_density() && peak > 0.0 {
            values.mapv_inplace(|v| v / peak);
        }

        (Surface::new(values), peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::zone::{FixedZone, ZoneBounds};

    #[test]
    fn default_spec_matches_comparison_window() {
        let spec = GridSpec::default();
        let grid = ZoneGrid::new(&spec);
        assert_eq!(grid.shape(), (50, 50));
        assert_abs_diff_eq!(grid.xs()[0], -1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.xs()[49], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.zs()[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.zs()[49], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn fixed_zone_rasterizes_binary() {
        let grid = ZoneGrid::new(&GridSpec::default());
        let zone = Zone::Fixed(FixedZone::new(ZoneBounds::with_vertical(3.5, 1.5)));
        let surface = grid.surface(&zone);

        assert!(surface
            .values()
            .iter()
            .all(|&v| v == 0.0 || v == 1.0));
        // Both states are present across the window.
        assert!(surface.values().iter().any(|&v| v == 1.0));
        assert!(surface.values().iter().any(|&v| v == 0.0));
    }

    #[test]
    fn surface_layout_is_row_per_height() {
        let spec = GridSpec {
            nx: 5,
            nz: 3,
            ..GridSpec::default()
        };
        let grid = ZoneGrid::new(&spec);
        let zone = Zone::Fixed(FixedZone::new(ZoneBounds::with_vertical(3.5, 1.5)));
        let surface = grid.surface(&zone);
        assert_eq!(surface.values().dim(), (3, 5));
    }
}
