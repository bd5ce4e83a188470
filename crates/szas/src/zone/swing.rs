//! The batter's swing zone, fit to swung-at pitches.

use crate::data::PitchRecord;
use crate::error::SzasError;

/// Determinant below this is treated as a collapsed kernel.
const MIN_DET: f64 = 1e-12;

/// 2-D Gaussian kernel density over swing locations.
///
/// Bandwidth follows Scott's rule: the kernel covariance is the sample
/// covariance scaled by `n^(-2/(d+4))` with `d = 2`. Evaluation returns the
/// raw density; the grid evaluator rescales a rasterized swing surface to
/// peak 1 so that thresholding at 0.5 selects the 50 %-of-maximum contour.
#[derive(Debug, Clone)]
pub struct SwingZone {
    /// Training locations, one `(px, pz)` per swing.
    points: Vec<(f64, f64)>,
    /// Inverse of the bandwidth-scaled covariance.
    inv_cov: [[f64; 2]; 2],
    /// `1 / (n · 2π · √det)` — Gaussian normalization over all kernels.
    norm: f64,
}

impl SwingZone {
    /// Fit to a swing sample. The caller is responsible for the
    /// minimum-sample policy; this requires at least two distinct points.
    ///
    /// # Errors
    ///
    /// [`SzasError::DegenerateFit`] when the sample covariance collapses
    /// (all swings at one point, or perfectly collinear locations).
    pub fn fit(swings: &[&PitchRecord]) -> Result<Self, SzasError> {
        let n = swings.len();
        if n < 2 {
            return Err(SzasError::degenerate(
                "swing zone",
                format!("need at least 2 swing locations, have {n}"),
            ));
        }

        let points: Vec<(f64, f64)> = swings.iter().map(|s| (s.px, s.pz)).collect();

        let inv_n = 1.0 / n as f64;
        let mean_x: f64 = points.iter().map(|p| p.0).sum::<f64>() * inv_n;
        let mean_z: f64 = points.iter().map(|p| p.1).sum::<f64>() * inv_n;

        // Unbiased sample covariance.
        let mut cov_xx = 0.0;
        let mut cov_zz = 0.0;
        let mut cov_xz = 0.0;
        for &(x, z) in &points {
            let dx = x - mean_x;
            let dz = z - mean_z;
            cov_xx += dx * dx;
            cov_zz += dz * dz;
            cov_xz += dx * dz;
        }
        let denom = (n - 1) as f64;
        cov_xx /= denom;
        cov_zz /= denom;
        cov_xz /= denom;

        // Scott's rule for d = 2: covariance scale n^(-2/(d+4)) = n^(-1/3).
        let scale = (n as f64).powf(-1.0 / 3.0);
        let s_xx = cov_xx * scale;
        let s_zz = cov_zz * scale;
        let s_xz = cov_xz * scale;

        let det = s_xx * s_zz - s_xz * s_xz;
        if !det.is_finite() || det <= MIN_DET {
            return Err(SzasError::degenerate(
                "swing zone",
                "singular bandwidth covariance",
            ));
        }

        let inv_cov = [[s_zz / det, -s_xz / det], [-s_xz / det, s_xx / det]];
        let norm = 1.0 / (n as f64 * 2.0 * std::f64::consts::PI * det.sqrt());

        tracing::debug!(n_swings = n, det, "swing zone fit");

        Ok(Self {
            points,
            inv_cov,
            norm,
        })
    }

    /// Raw kernel density at `(px, pz)`.
    pub fn density(&self, px: f64, pz: f64) -> f64 {
        let sum: f64 = self
            .points
            .iter()
            .map(|&(x, z)| {
                let dx = px - x;
                let dz = pz - z;
                let quad = dx * (self.inv_cov[0][0] * dx + self.inv_cov[0][1] * dz)
                    + dz * (self.inv_cov[1][0] * dx + self.inv_cov[1][1] * dz);
                (-0.5 * quad).exp()
            })
            .sum();
        self.norm * sum
    }

    /// Number of training swings.
    pub fn n_swings(&self) -> usize {
        self.points.len()
    }
}
