//! Pipeline configuration with build-time validation.
//!
//! [`SzasConfig`] collects everything a scoring request can tune: the
//! comparison grid, the minimum-sample policy, the mask threshold, the
//! confound-significance cutoff, and the logistic fit parameters. The `bon`
//! builder validates at `build()` so an invalid combination is rejected
//! before any data is touched — grid resolution in particular is capped so
//! per-request work stays bounded.
//!
//! # Example
//!
//! ```
//! use szas::SzasConfig;
//!
//! // All defaults.
//! let config = SzasConfig::builder().build().unwrap();
//! assert_eq!(config.min_takes, 100);
//!
//! // A coarser grid for a quick pass.
//! use szas::surface::GridSpec;
//! let config = SzasConfig::builder()
//!     .grid(GridSpec { nx: 25, nz: 25, ..GridSpec::default() })
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::data::{MIN_SWINGS, MIN_TAKES};
use crate::fit::LogisticParams;
use crate::surface::{GridSpec, MASK_THRESHOLD};

/// Largest allowed sample count per grid axis.
///
/// 512×512 is already far beyond rendering needs; the cap keeps rasterize
/// and compare costs predictable.
pub const MAX_GRID_AXIS: usize = 512;

/// Wald z-statistic cutoff for the confound check. |z| at or below this
/// reads as noise and contributes zero bias.
pub const DEFAULT_BIAS_Z_CUTOFF: f64 = 1.96;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid axis {axis} must have between 2 and {MAX_GRID_AXIS} samples, got {got}")]
    InvalidGridResolution { axis: &'static str, got: usize },

    #[error("grid window is empty on the {axis} axis ({lo} .. {hi})")]
    EmptyGridWindow { axis: &'static str, lo: f64, hi: f64 },

    #[error("mask threshold must be in (0, 1), got {0}")]
    InvalidMaskThreshold(f64),

    #[error("bias z cutoff must be non-negative, got {0}")]
    InvalidBiasCutoff(f64),

    #[error("logistic ridge penalty must be positive, got {0}")]
    InvalidRidgePenalty(f64),

    #[error("logistic iteration cap must be at least 1")]
    InvalidIterationCap,
}

/// Tunables for one scoring request.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct SzasConfig {
    /// Comparison window and resolution shared by all three surfaces.
    #[builder(default)]
    pub grid: GridSpec,

    /// Minimum takes before the called zone will fit. Default: 100.
    #[builder(default = MIN_TAKES)]
    pub min_takes: usize,

    /// Minimum swings before the swing zone will fit. Default: 200.
    #[builder(default = MIN_SWINGS)]
    pub min_swings: usize,

    /// Mask cutoff for IoU. Default: 0.5.
    #[builder(default = MASK_THRESHOLD)]
    pub mask_threshold: f64,

    /// |z| above this makes the confound coefficient count as bias.
    /// Default: 1.96.
    #[builder(default = DEFAULT_BIAS_Z_CUTOFF)]
    pub bias_z_cutoff: f64,

    /// Parameters for every logistic fit in the request.
    #[builder(default)]
    pub logistic: LogisticParams,
}

impl<S: szas_config_builder::IsComplete> SzasConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for out-of-range grid resolution, an empty
    /// grid window, a mask threshold outside (0, 1), a negative bias
    /// cutoff, or unusable logistic parameters.
    pub fn build(self) -> Result<SzasConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl SzasConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (axis, got) in [("x", self.grid.nx), ("z", self.grid.nz)] {
            if !(2..=MAX_GRID_AXIS).contains(&got) {
                return Err(ConfigError::InvalidGridResolution { axis, got });
            }
        }
        if self.grid.x_min >= self.grid.x_max {
            return Err(ConfigError::EmptyGridWindow {
                axis: "x",
                lo: self.grid.x_min,
                hi: self.grid.x_max,
            });
        }
        if self.grid.z_min >= self.grid.z_max {
            return Err(ConfigError::EmptyGridWindow {
                axis: "z",
                lo: self.grid.z_min,
                hi: self.grid.z_max,
            });
        }
        if !(self.mask_threshold > 0.0 && self.mask_threshold < 1.0) {
            return Err(ConfigError::InvalidMaskThreshold(self.mask_threshold));
        }
        if !(self.bias_z_cutoff >= 0.0) {
            return Err(ConfigError::InvalidBiasCutoff(self.bias_z_cutoff));
        }
        if !(self.logistic.lambda > 0.0) {
            return Err(ConfigError::InvalidRidgePenalty(self.logistic.lambda));
        }
        if self.logistic.max_iter == 0 {
            return Err(ConfigError::InvalidIterationCap);
        }
        Ok(())
    }
}

impl Default for SzasConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}
