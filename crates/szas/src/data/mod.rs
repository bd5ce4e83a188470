//! Pitch data model and filtering.
//!
//! The scoring pipeline consumes a homogeneous slice of [`PitchRecord`]
//! already resident in memory — acquisition and caching are external
//! concerns. [`PitchFilter`] narrows a collection; [`split_pitches`]
//! partitions it into the take/swing classes the zone models train on.

mod filter;
mod pitch;

pub use filter::{split_pitches, PitchFilter, SplitPitches, MIN_SWINGS, MIN_TAKES};
pub use pitch::{BatSide, Call, Decision, PitchRecord, PlayerId};
