//! szas: strike zone alignment scoring.
//!
//! Three models of the same decision boundary, built from pitch-level data:
//! the rulebook rectangle, the umpire's called zone (a logistic surface fit
//! to taken pitches), and the batter's swing zone (a kernel density fit to
//! swings). The crate rasterizes all three onto one grid, measures how well
//! they agree (IoU, divergence, centroids), folds the overlaps and a
//! confound penalty into a single alignment score, and separately tests
//! whether a batter's in-at-bat swing history shifts the calls they get.
//!
//! # Key Types
//!
//! - [`PitchRecord`] / [`PitchFilter`] - Input data and narrowing
//! - [`SzasConfig`] - Validated pipeline configuration
//! - [`SzasReport`] / [`ZoneSurfaces`] - Scoring and rendering outputs
//! - [`InfluenceResult`] / [`AggregateInfluenceResult`] - Sequential analysis
//! - [`SzasError`] - The typed failure taxonomy
//!
//! # Scoring
//!
//! ```
//! use szas::{score, PitchFilter, SzasConfig};
//! use szas::testing::synthetic_at_bats;
//!
//! let pitches = synthetic_at_bats(300, 1, 42);
//! let report = score(&pitches, &PitchFilter::new(), &SzasConfig::default()).unwrap();
//! assert!((0.0..=1.0).contains(&report.szas));
//! ```
//!
//! Every operation is a pure function of the pitch collection, the filter,
//! and the config: models are fit per request and discarded, nothing is
//! cached, and no global state exists. Data acquisition, transport, and
//! rendering live outside this crate.

pub mod config;
pub mod data;
pub mod error;
pub mod fit;
pub mod influence;
pub mod score;
pub mod surface;
pub mod testing;
pub mod utils;
pub mod zone;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Configuration
pub use config::{ConfigError, SzasConfig};

// Input data
pub use data::{BatSide, Call, Decision, PitchFilter, PitchRecord, PlayerId};

// Errors
pub use error::{SampleClass, SzasError};

// Scoring operations and results
pub use score::{score, surfaces, SzasComponents, SzasReport, ZoneSurfaces};

// Influence operations and results
pub use influence::{
    analyze_batter, analyze_batters, analyze_top_batters, rank_batters,
    AggregateInfluenceResult, InfluenceParams, InfluenceResult,
};

// Geometry and surfaces
pub use surface::{Centroid, GridSpec, Surface, ZoneGrid};
pub use zone::{Zone, ZoneBounds};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
