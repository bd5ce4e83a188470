//! The three strike-zone models.
//!
//! Every variant answers the same question — "how strike-like is the point
//! `(px, pz)`?" — through [`Zone::evaluate`], so the grid evaluator and the
//! surface comparator never care which variant they hold:
//!
//! - [`FixedZone`]: the rulebook rectangle, a deterministic 0/1 rule.
//! - [`CalledZone`]: logistic surface fit to taken pitches; evaluation is a
//!   calibrated call probability and the decision boundary is the 0.5
//!   probability contour.
//! - [`SwingZone`]: Gaussian kernel density fit to swung-at pitches;
//!   evaluation is a raw density that the grid evaluator rescales to peak 1,
//!   so its "0.5 boundary" is the 50 %-of-maximum *density* contour — not a
//!   probability like the other two. The thresholds look identical at the
//!   comparator but mean different things; see [`crate::surface`].
//!
//! Zones are fit fresh per query from a filtered subset, never mutated, and
//! dropped when the request completes.

mod called;
mod fixed;
mod swing;

use serde::{Deserialize, Serialize};

pub use called::CalledZone;
pub use fixed::FixedZone;
pub use swing::SwingZone;

use crate::data::PitchRecord;

/// Regulation plate width, feet (17 inches).
pub const PLATE_WIDTH: f64 = 17.0 / 12.0;

/// Baseball radius, feet (~1.45 inches): a pitch clipping the plate edge is
/// still a strike.
pub const BALL_RADIUS: f64 = 1.45 / 12.0;

/// Horizontal and vertical extent of the fixed zone.
///
/// The half-width is a league constant; the vertical bounds are the
/// batter's — or, with no single batter in scope, the filtered collection's
/// mean bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    /// Half the plate width plus the ball-radius allowance, feet.
    pub half_width: f64,
    /// Top of the zone, feet.
    pub sz_top: f64,
    /// Bottom of the zone, feet.
    pub sz_bot: f64,
}

/// Fallback vertical bounds when a collection carries no records at all.
const DEFAULT_SZ_TOP: f64 = 3.5;
const DEFAULT_SZ_BOT: f64 = 1.5;

impl ZoneBounds {
    /// Bounds with the regulation half-width and the given vertical extent.
    pub fn with_vertical(sz_top: f64, sz_bot: f64) -> Self {
        Self {
            half_width: PLATE_WIDTH / 2.0 + BALL_RADIUS,
            sz_top,
            sz_bot,
        }
    }

    /// Bounds averaged over a filtered collection's per-pitch measurements.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PitchRecord>) -> Self {
        let mut n = 0usize;
        let mut top_sum = 0.0;
        let mut bot_sum = 0.0;
        for record in records {
            n += 1;
            top_sum += record.sz_top;
            bot_sum += record.sz_bot;
        }
        if n == 0 {
            return Self::with_vertical(DEFAULT_SZ_TOP, DEFAULT_SZ_BOT);
        }
        Self::with_vertical(top_sum / n as f64, bot_sum / n as f64)
    }
}

/// A zone model of any variant, behind the single evaluate contract.
#[derive(Debug, Clone)]
pub enum Zone {
    Fixed(FixedZone),
    Called(CalledZone),
    Swing(SwingZone),
}

impl Zone {
    /// Strike-likeness at `(px, pz)`.
    ///
    /// Fixed: exactly 0 or 1. Called: calibrated probability in [0, 1].
    /// Swing: raw kernel density (non-negative, unbounded above); the grid
    /// evaluator normalizes it to [0, 1] against the grid peak.
    pub fn evaluate(&self, px: f64, pz: f64) -> f64 {
        match self {
            Self::Fixed(zone) => zone.evaluate(px, pz),
            Self::Called(zone) => zone.evaluate(px, pz),
            Self::Swing(zone) => zone.density(px, pz),
        }
    }

    /// Whether evaluation yields a density needing peak normalization rather
    /// than a probability.
    pub fn is_density(&self) -> bool {
        matches!(self, Self::Swing(_))
    }
}
