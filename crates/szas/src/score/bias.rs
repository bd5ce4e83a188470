//! Confound check: does swing tendency leak into the call model?
//!
//! A one-off regression of the call outcome on pitch location *plus* the
//! batter's swing intensity at that location. If calls were purely a
//! function of location, the swing-intensity coefficient should be noise;
//! a coefficient that clears the Wald-z cutoff instead contributes a bias
//! penalty to the composite score.

use ndarray::{Array1, Array2};

use crate::config::SzasConfig;
use crate::data::PitchRecord;
use crate::error::SzasError;
use crate::fit::LogisticModel;
use crate::surface::ZoneGrid;
use crate::zone::SwingZone;

/// Feature layout: `[1, px, pz, swing_intensity]`.
const N_FEATURES: usize = 4;
const SWING_TERM: usize = 3;

/// Fit the confound regression over the take sample and reduce it to a
/// bias scalar in [0, 1].
///
/// Swing intensity is the swing zone's density rescaled by its peak over
/// the comparison grid, so the feature lives on the same [0, 1] scale as
/// the rasterized swing surface. Returns 0 when the location-controlled
/// swing coefficient does not clear `config.bias_z_cutoff`, else the
/// coefficient magnitude clipped to 1.
///
/// # Errors
///
/// [`SzasError::DegenerateFit`] from the underlying solver.
pub fn influence_bias(
    takes: &[&PitchRecord],
    swing_zone: &SwingZone,
    grid: &ZoneGrid,
    config: &SzasConfig,
) -> Result<f64, SzasError> {
    debug_assert!(!takes.is_empty());

    let peak = grid
        .zs()
        .iter()
        .flat_map(|&z| grid.xs().iter().map(move |&x| swing_zone.density(x, z)))
        .fold(0.0f64, f64::max);

    let intensity = |px: f64, pz: f64| {
        if peak > 0.0 {
            (swing_zone.density(px, pz) / peak).min(1.0)
        } else {
            0.0
        }
    };

    let n = takes.len();
    let mut x = Array2::<f64>::zeros((n, N_FEATURES));
    let mut y = Array1::<f64>::zeros(n);
    for (i, take) in takes.iter().enumerate() {
        x[[i, 0]] = 1.0;
        x[[i, 1]] = take.px;
        x[[i, 2]] = take.pz;
        x[[i, SWING_TERM]] = intensity(take.px, take.pz);
        y[i] = if take.is_called_strike() { 1.0 } else { 0.0 };
    }

    let model = LogisticModel::fit(x.view(), y.view(), &config.logistic, "confound check")?;
    let coefficient = model.coefficient(SWING_TERM);
    let z = model.z_statistic(SWING_TERM);

    let bias = if z.abs() <= config.bias_z_cutoff {
        0.0
    } else {
        coefficient.abs().min(1.0)
    };
    tracing::debug!(coefficient, z, bias, "confound check");

    Ok(bias)
}
