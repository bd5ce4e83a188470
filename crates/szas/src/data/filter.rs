//! Filtering and partitioning of pitch collections.
//!
//! [`PitchFilter`] narrows a collection by batter/umpire/season/side, and
//! [`split_pitches`] partitions the survivors into the two decision classes
//! the zone models train on. Minimum-sample policy lives on
//! [`SplitPitches::require`]: the scoring pipeline refuses to fit rather
//! than degrade silently when a class is short.

use serde::{Deserialize, Serialize};

use crate::data::{BatSide, PitchRecord, PlayerId};
use crate::error::{SampleClass, SzasError};

/// Minimum takes needed to fit the called (regression) zone.
pub const MIN_TAKES: usize = 100;

/// Minimum swings needed to fit the swing (density) zone.
pub const MIN_SWINGS: usize = 200;

/// Optional narrowing criteria applied before the take/swing split.
///
/// All fields default to "no restriction"; combine with the `with_*`
/// methods.
///
/// # Example
///
/// ```
/// use szas::data::PitchFilter;
///
/// let filter = PitchFilter::new().with_batter(660271).with_season(2024);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchFilter {
    /// Keep only pitches faced by this batter.
    pub batter: Option<PlayerId>,
    /// Keep only pitches called by this umpire.
    pub umpire: Option<PlayerId>,
    /// Keep only pitches from this season.
    pub season: Option<u16>,
    /// Keep only plate appearances from this side.
    pub side: Option<BatSide>,
}

impl PitchFilter {
    /// An unrestricted filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one batter.
    pub fn with_batter(mut self, batter: PlayerId) -> Self {
        self.batter = Some(batter);
        self
    }

    /// Restrict to one umpire.
    pub fn with_umpire(mut self, umpire: PlayerId) -> Self {
        self.umpire = Some(umpire);
        self
    }

    /// Restrict to one season.
    pub fn with_season(mut self, season: u16) -> Self {
        self.season = Some(season);
        self
    }

    /// Restrict to one batting side.
    pub fn with_side(mut self, side: BatSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Whether `pitch` passes every restriction except the side.
    fn matches_ignoring_side(&self, pitch: &PitchRecord) -> bool {
        self.batter.is_none_or(|b| pitch.batter == b)
            && self.umpire.is_none_or(|u| pitch.umpire == u)
            && self.season.is_none_or(|s| pitch.season == s)
    }

    /// Whether `pitch` passes every restriction.
    pub fn matches(&self, pitch: &PitchRecord) -> bool {
        self.matches_ignoring_side(pitch) && self.side.is_none_or(|s| pitch.side == s)
    }

    /// Apply the filter, returning references to the surviving records.
    ///
    /// # Errors
    ///
    /// [`SzasError::ConflictingSideFilter`] when a batter restriction matched
    /// records but the side restriction excluded every one of them — the
    /// combination is contradictory, not merely under-sampled.
    pub fn apply<'a>(&self, pitches: &'a [PitchRecord]) -> Result<Vec<&'a PitchRecord>, SzasError> {
        let kept: Vec<&PitchRecord> = pitches.iter().filter(|p| self.matches(p)).collect();

        if kept.is_empty() {
            if let (Some(batter), Some(side)) = (self.batter, self.side) {
                let has_any_side = pitches.iter().any(|p| self.matches_ignoring_side(p));
                if has_any_side {
                    return Err(SzasError::ConflictingSideFilter { batter, side });
                }
            }
        }

        Ok(kept)
    }
}

/// A pitch collection partitioned into the two decision classes.
#[derive(Debug, Clone)]
pub struct SplitPitches<'a> {
    /// Taken pitches: the called-zone training sample.
    pub takes: Vec<&'a PitchRecord>,
    /// Swung-at pitches: the swing-zone training sample.
    pub swings: Vec<&'a PitchRecord>,
}

impl<'a> SplitPitches<'a> {
    /// Total records across both classes.
    pub fn total(&self) -> usize {
        self.takes.len() + self.swings.len()
    }

    /// Enforce the minimum-sample policy for model fitting.
    ///
    /// # Errors
    ///
    /// [`SzasError::InsufficientData`] naming whichever class came up short
    /// (takes are checked first).
    pub fn require(&self, min_takes: usize, min_swings: usize) -> Result<(), SzasError> {
        if self.takes.len() < min_takes {
            return Err(SzasError::insufficient(
                SampleClass::Takes,
                self.takes.len(),
                min_takes,
            ));
        }
        if self.swings.len() < min_swings {
            return Err(SzasError::insufficient(
                SampleClass::Swings,
                self.swings.len(),
                min_swings,
            ));
        }
        Ok(())
    }
}

/// Filter a collection and partition it by decision tag.
///
/// # Errors
///
/// Propagates [`SzasError::ConflictingSideFilter`] from [`PitchFilter::apply`].
pub fn split_pitches<'a>(
    pitches: &'a [PitchRecord],
    filter: &PitchFilter,
) -> Result<SplitPitches<'a>, SzasError> {
    let kept = filter.apply(pitches)?;
    let (takes, swings): (Vec<_>, Vec<_>) = kept.into_iter().partition(|p| p.is_take());
    Ok(SplitPitches { takes, swings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Call, Decision};

    fn pitch(batter: PlayerId, side: BatSide, decision: Decision) -> PitchRecord {
        PitchRecord {
            px: 0.0,
            pz: 2.5,
            decision,
            umpire: 1,
            batter,
            side,
            season: 2024,
            sz_top: 3.5,
            sz_bot: 1.5,
            game_id: 1,
            at_bat: 1,
            pitch_number: 1,
        }
    }

    #[test]
    fn split_partitions_by_decision() {
        let pitches = vec![
            pitch(10, BatSide::Right, Decision::Take(Call::Strike)),
            pitch(10, BatSide::Right, Decision::Swing),
            pitch(10, BatSide::Right, Decision::Take(Call::Ball)),
        ];
        let split = split_pitches(&pitches, &PitchFilter::new()).unwrap();
        assert_eq!(split.takes.len(), 2);
        assert_eq!(split.swings.len(), 1);
        assert_eq!(split.total(), 3);
    }

    #[test]
    fn filter_by_batter_and_season() {
        let mut a = pitch(10, BatSide::Right, Decision::Swing);
        a.season = 2023;
        let b = pitch(11, BatSide::Right, Decision::Swing);
        let c = pitch(10, BatSide::Right, Decision::Swing);
        let pitches = vec![a, b, c];

        let filter = PitchFilter::new().with_batter(10).with_season(2024);
        let split = split_pitches(&pitches, &filter).unwrap();
        assert_eq!(split.swings.len(), 1);
    }

    #[test]
    fn conflicting_side_filter_is_typed() {
        // Batter 10 only ever bats right; asking for their lefty pitches is
        // a contradiction, not a small sample.
        let pitches = vec![
            pitch(10, BatSide::Right, Decision::Swing),
            pitch(10, BatSide::Right, Decision::Take(Call::Ball)),
        ];
        let filter = PitchFilter::new().with_batter(10).with_side(BatSide::Left);
        let err = split_pitches(&pitches, &filter).unwrap_err();
        assert_eq!(
            err,
            SzasError::ConflictingSideFilter {
                batter: 10,
                side: BatSide::Left
            }
        );
    }

    #[test]
    fn missing_batter_is_not_a_conflict() {
        let pitches = vec![pitch(10, BatSide::Right, Decision::Swing)];
        let filter = PitchFilter::new().with_batter(99).with_side(BatSide::Left);
        let split = split_pitches(&pitches, &filter).unwrap();
        assert_eq!(split.total(), 0);
    }

    #[test]
    fn require_reports_takes_first() {
        let pitches = vec![pitch(10, BatSide::Right, Decision::Swing)];
        let split = split_pitches(&pitches, &PitchFilter::new()).unwrap();

        let err = split.require(MIN_TAKES, MIN_SWINGS).unwrap_err();
        assert_eq!(
            err,
            SzasError::insufficient(SampleClass::Takes, 0, MIN_TAKES)
        );
    }

    #[test]
    fn require_boundary_is_inclusive() {
        let mut pitches = Vec::new();
        for i in 0..100u16 {
            let mut p = pitch(10, BatSide::Right, Decision::Take(Call::Ball));
            p.at_bat = i;
            pitches.push(p);
        }
        let split = split_pitches(&pitches, &PitchFilter::new()).unwrap();

        // 100 takes clears the takes minimum; swings then fail with counts.
        let err = split.require(MIN_TAKES, MIN_SWINGS).unwrap_err();
        assert_eq!(
            err,
            SzasError::insufficient(SampleClass::Swings, 0, MIN_SWINGS)
        );

        assert!(split.require(100, 0).is_ok());
        assert_eq!(
            split.require(101, 0).unwrap_err(),
            SzasError::insufficient(SampleClass::Takes, 100, 101)
        );
    }
}
