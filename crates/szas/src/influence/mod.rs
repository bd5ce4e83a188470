//! Sequential influence analysis.
//!
//! The freeswinger question: when a batter who has been swinging takes a
//! borderline pitch, does the call tilt? Per batter, takes from qualifying
//! at-bats (4+ pitches) get the batter's in-at-bat prior swing rate as a
//! regressor alongside location; the fitted coefficient and its odds ratio
//! are the answer. [`analyze_batters`] fans the per-batter fits out in
//! parallel and aggregates over the ones that succeed.

mod analyzer;
mod sequence;

pub use analyzer::{
    analyze_batter, analyze_batters, analyze_top_batters, rank_batters,
    AggregateInfluenceResult, BatterAvailability, BatterFailure, EdgeSplit, InfluenceParams,
    InfluenceResult, SwingRateStats,
};
pub use sequence::{analyzable_takes, qualifying_sequences, SequencedTake};
