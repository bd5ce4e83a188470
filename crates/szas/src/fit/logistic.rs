//! Ridge-penalized logistic regression via Newton–Raphson (IRLS).
//!
//! All three fitted pieces of the pipeline (called zone, confound check,
//! sequential influence) are binary logistic fits over a handful of
//! polynomial features. The design matrix carries an explicit leading
//! intercept column; the intercept is never penalized, every other
//! coefficient gets an L2 penalty so the fit stays finite on perfectly
//! separable data.
//!
//! Standard errors come from the inverse of the penalized Hessian at the
//! solution, which makes the Wald z-statistic for any coefficient available
//! to significance heuristics downstream.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::linalg;
use crate::error::SzasError;

/// Logit magnitudes beyond this are saturated anyway; clamping avoids
/// `exp` overflow on extreme separable data.
const MAX_LOGIT: f64 = 30.0;

/// Floor on the IRLS working weights to keep the Hessian well-conditioned.
const MIN_WORKING_WEIGHT: f64 = 1e-10;

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x.clamp(-MAX_LOGIT, MAX_LOGIT)).exp())
}

/// Parameters for a logistic fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// L2 penalty on non-intercept coefficients. Must be positive so the
    /// Hessian is invertible even on separable data.
    pub lambda: f64,
    /// Newton iteration cap; the fit is accepted at whatever point the cap
    /// lands on, provided coefficients are finite.
    pub max_iter: u32,
    /// Convergence threshold on the largest coefficient step.
    pub tol: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            max_iter: 25,
            tol: 1e-8,
        }
    }
}

/// A fitted binary logistic model.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Array1<f64>,
    standard_errors: Array1<f64>,
    n_samples: usize,
    n_iter: u32,
    converged: bool,
}

impl LogisticModel {
    /// Fit by penalized IRLS.
    ///
    /// `x` is the design matrix `[n_samples, n_features]` whose first column
    /// is the intercept (all ones); `y` holds 0/1 targets.
    ///
    /// # Errors
    ///
    /// [`SzasError::DegenerateFit`] when the Newton system is singular or a
    /// coefficient goes non-finite; `model` names the caller's model.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        params: &LogisticParams,
        model: &'static str,
    ) -> Result<Self, SzasError> {
        let n = x.nrows();
        let p = x.ncols();
        debug_assert_eq!(y.len(), n);
        debug_assert!(params.lambda > 0.0, "ridge penalty must be positive");

        let mut beta = Array1::<f64>::zeros(p);
        let mut hessian = Array2::<f64>::zeros((p, p));
        let mut n_iter = 0;
        let mut converged = false;

        while n_iter < params.max_iter {
            n_iter += 1;

            // Working response and weights at the current coefficients.
            let eta = x.dot(&beta);
            let mu = eta.mapv(sigmoid);

            // Gradient: Xᵀ(y − μ) − λβ (intercept unpenalized).
            let residual = &y.to_owned() - &mu;
            let mut gradient = x.t().dot(&residual);
            for j in 1..p {
                gradient[j] -= params.lambda * beta[j];
            }

            // Hessian: XᵀWX + λI, W = diag(μ(1−μ)).
            hessian.fill(0.0);
            for i in 0..n {
                let w = (mu[i] * (1.0 - mu[i])).max(MIN_WORKING_WEIGHT);
                let row = x.row(i);
                for j in 0..p {
                    let wj = w * row[j];
                    for k in j..p {
                        hessian[[j, k]] += wj * row[k];
                    }
                }
            }
            for j in 0..p {
                for k in 0..j {
                    hessian[[j, k]] = hessian[[k, j]];
                }
            }
            for j in 1..p {
                hessian[[j, j]] += params.lambda;
            }

            let step = linalg::solve(hessian.view(), &gradient)
                .ok_or_else(|| SzasError::degenerate(model, "singular newton system"))?;

            beta += &step;

            if beta.iter().any(|b| !b.is_finite()) {
                return Err(SzasError::degenerate(model, "non-finite coefficients"));
            }

            let max_step = step.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
            if max_step < params.tol {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::debug!(model, n_iter, "logistic fit stopped at iteration cap");
        }

        // Covariance of β̂ ≈ (XᵀWX + λI)⁻¹ at the solution.
        let covariance = linalg::invert(hessian.view())
            .ok_or_else(|| SzasError::degenerate(model, "singular hessian at solution"))?;
        let standard_errors = Array1::from_iter((0..p).map(|j| covariance[[j, j]].max(0.0).sqrt()));

        Ok(Self {
            coefficients: beta,
            standard_errors,
            n_samples: n,
            n_iter,
            converged,
        })
    }

    /// Fitted coefficients, intercept first.
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    /// Coefficient for feature `idx` (0 = intercept).
    pub fn coefficient(&self, idx: usize) -> f64 {
        self.coefficients[idx]
    }

    /// Wald z-statistic for feature `idx`. Infinite when the standard error
    /// underflows to zero.
    pub fn z_statistic(&self, idx: usize) -> f64 {
        let se = self.standard_errors[idx];
        if se > 0.0 {
            self.coefficients[idx] / se
        } else {
            f64::INFINITY * self.coefficients[idx].signum()
        }
    }

    /// Calibrated probability for one feature row (including the intercept
    /// element).
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.coefficients.len());
        let eta: f64 = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, b)| f * b)
            .sum();
        sigmoid(eta)
    }

    /// Fraction of rows classified correctly at the 0.5 boundary.
    pub fn accuracy(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        let n = x.nrows();
        if n == 0 {
            return 0.0;
        }
        let eta = x.dot(&self.coefficients);
        let correct = eta
            .iter()
            .zip(y.iter())
            .filter(|(e, t)| (sigmoid(**e) >= 0.5) == (**t >= 0.5))
            .count();
        correct as f64 / n as f64
    }

    /// Rows the model was fit on.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Newton iterations taken.
    pub fn n_iter(&self) -> u32 {
        self.n_iter
    }

    /// Whether the step criterion was met before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }
}
