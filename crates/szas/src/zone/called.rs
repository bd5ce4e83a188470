//! The umpire's called zone, fit to taken pitches.

use ndarray::{Array1, Array2};

use crate::data::PitchRecord;
use crate::error::SzasError;
use crate::fit::{LogisticModel, LogisticParams};

/// Number of polynomial terms, intercept included.
pub const N_FEATURES: usize = 6;

/// Quadratic location features with interaction: `[1, px, pz, px², pz², px·pz]`.
///
/// The squared terms let the 0.5 contour close into an ellipse-like boundary
/// instead of a half-plane; the interaction term lets it tilt.
#[inline]
pub fn location_features(px: f64, pz: f64) -> [f64; N_FEATURES] {
    [1.0, px, pz, px * px, pz * pz, px * pz]
}

/// Logistic model of the umpire's strike call as a function of location.
///
/// Trained on takes only — the umpire rules on nothing else. Evaluation is a
/// calibrated probability; the called boundary is the 0.5 contour.
#[derive(Debug, Clone)]
pub struct CalledZone {
    model: LogisticModel,
}

impl CalledZone {
    /// Fit to a take sample. The caller is responsible for the
    /// minimum-sample policy; this only requires a non-empty slice.
    ///
    /// # Errors
    ///
    /// [`SzasError::DegenerateFit`] from the underlying solver. The ridge
    /// penalty keeps separable samples finite, so this is rare in practice.
    pub fn fit(takes: &[&PitchRecord], params: &LogisticParams) -> Result<Self, SzasError> {
        debug_assert!(!takes.is_empty(), "fit requires at least one take");

        let n = takes.len();
        let mut x = Array2::<f64>::zeros((n, N_FEATURES));
        let mut y = Array1::<f64>::zeros(n);
        for (i, take) in takes.iter().enumerate() {
            let features = location_features(take.px, take.pz);
            for (j, value) in features.iter().enumerate() {
                x[[i, j]] = *value;
            }
            y[i] = if take.is_called_strike() { 1.0 } else { 0.0 };
        }

        let model = LogisticModel::fit(x.view(), y.view(), params, "called zone")?;
        tracing::debug!(
            n_takes = n,
            n_iter = model.n_iter(),
            converged = model.converged(),
            "called zone fit"
        );

        Ok(Self { model })
    }

    /// Probability the umpire calls a strike at `(px, pz)`.
    #[inline]
    pub fn evaluate(&self, px: f64, pz: f64) -> f64 {
        self.model.predict_proba(&location_features(px, pz))
    }

    /// The underlying fitted model.
    pub fn model(&self) -> &LogisticModel {
        &self.model
    }
}
