//! Pitch-level event records.
//!
//! A [`PitchRecord`] is one observed pitch with its plate-crossing location,
//! the batter's decision, and enough identity/sequence context to group
//! records by at-bat. The "call outcome exists iff the pitch was taken"
//! invariant is enforced by construction: [`Decision::Take`] carries the
//! [`Call`], [`Decision::Swing`] carries nothing.

use serde::{Deserialize, Serialize};

/// MLBAM-style numeric player identifier.
pub type PlayerId = u32;

/// Outcome of a taken pitch as ruled by the umpire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    Strike,
    Ball,
}

/// The batter's decision on a pitch.
///
/// Exactly one of the two; the umpire only rules on takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Batter did not offer; the umpire made a call.
    Take(Call),
    /// Batter offered at the pitch (swinging strike, foul, or ball in play).
    Swing,
}

/// Which batter's box the batter stood in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatSide {
    Left,
    Right,
}

impl std::fmt::Display for BatSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// One observed pitch.
///
/// Locations are plate-crossing coordinates in feet: `px` horizontal
/// (catcher's view, positive toward the right-handed batter's box is
/// negative `px`), `pz` height above the plate. `sz_top`/`sz_bot` are the
/// batter's personalized vertical zone bounds measured on that pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchRecord {
    /// Horizontal plate-crossing position, feet from plate center.
    pub px: f64,
    /// Vertical plate-crossing position, feet above ground.
    pub pz: f64,
    /// What the batter did, and the call if they took.
    pub decision: Decision,
    /// Home-plate umpire for the game.
    pub umpire: PlayerId,
    /// Batter facing the pitch.
    pub batter: PlayerId,
    /// Batter's side for this plate appearance.
    pub side: BatSide,
    /// Season year.
    pub season: u16,
    /// Top of the batter's personalized strike zone, feet.
    pub sz_top: f64,
    /// Bottom of the batter's personalized strike zone, feet.
    pub sz_bot: f64,
    /// Game the pitch belongs to.
    pub game_id: u32,
    /// At-bat number within the game.
    pub at_bat: u16,
    /// 1-based pitch position within the at-bat.
    pub pitch_number: u8,
}

impl PitchRecord {
    /// True if the batter took the pitch.
    #[inline]
    pub fn is_take(&self) -> bool {
        matches!(self.decision, Decision::Take(_))
    }

    /// True if the batter swung.
    #[inline]
    pub fn is_swing(&self) -> bool {
        matches!(self.decision, Decision::Swing)
    }

    /// The umpire's call, present only on takes.
    #[inline]
    pub fn call(&self) -> Option<Call> {
        match self.decision {
            Decision::Take(call) => Some(call),
            Decision::Swing => None,
        }
    }

    /// True if the pitch was taken and called a strike.
    #[inline]
    pub fn is_called_strike(&self) -> bool {
        self.call() == Some(Call::Strike)
    }
}
