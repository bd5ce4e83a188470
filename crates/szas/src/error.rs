//! Error taxonomy for the scoring pipeline.
//!
//! Every fallible operation in this crate returns [`SzasError`]. The variants
//! are structured so a caller can tell "supply more data or relax filters"
//! ([`SzasError::InsufficientData`], [`SzasError::ConflictingSideFilter`])
//! apart from "this data cannot produce a fit" ([`SzasError::DegenerateFit`]).
//! None of them are ever downgraded to a fabricated numeric result.
//!
//! An all-zero surface has no centroid; that case is *not* an error — it is
//! reported structurally as an absent [`Centroid`](crate::surface::Centroid).

use serde::{Deserialize, Serialize};

use crate::data::BatSide;

/// Which sample a minimum-size requirement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleClass {
    /// Taken pitches (the called-zone training sample).
    Takes,
    /// Swung-at pitches (the swing-zone training sample).
    Swings,
    /// At-bats with enough pitches for sequential analysis.
    QualifyingAtBats,
    /// Takes with a defined prior swing rate (pitch 2+ of a qualifying at-bat).
    AnalyzableTakes,
}

impl std::fmt::Display for SampleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Takes => "takes",
            Self::Swings => "swings",
            Self::QualifyingAtBats => "qualifying at-bats",
            Self::AnalyzableTakes => "analyzable takes",
        };
        f.write_str(name)
    }
}

/// Errors produced by the scoring and influence pipelines.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum SzasError {
    /// A sample fell below its stated minimum. Recoverable: supply more data
    /// or relax the filters.
    #[error("not enough {class}: have {available}, need {required}")]
    InsufficientData {
        class: SampleClass,
        available: usize,
        required: usize,
    },

    /// A model fit failed to produce finite coefficients. Retrying with the
    /// same data cannot help; fall back to a coarser aggregate if one exists.
    #[error("{model} fit is degenerate: {reason}")]
    DegenerateFit { model: String, reason: String },

    /// A side filter excludes every pitch the subject actually has on record.
    #[error("batter {batter} has no recorded pitches batting {side}")]
    ConflictingSideFilter { batter: u32, side: BatSide },
}

impl SzasError {
    /// Construct an [`SzasError::InsufficientData`] for a sample that came up short.
    pub fn insufficient(class: SampleClass, available: usize, required: usize) -> Self {
        Self::InsufficientData {
            class,
            available,
            required,
        }
    }

    /// Construct a [`SzasError::DegenerateFit`] naming the model that failed.
    pub fn degenerate(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateFit {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// True for errors a caller can address by supplying more data or
    /// loosening filters.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DegenerateFit { .. })
    }
}
