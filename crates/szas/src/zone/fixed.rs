//! The rulebook strike zone.

use super::ZoneBounds;

/// Deterministic rectangular zone: a pitch is a strike iff it crosses the
/// plate within the ball-radius-widened plate width and between the
/// batter's vertical bounds. No fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedZone {
    bounds: ZoneBounds,
}

impl FixedZone {
    /// Zone for the given bounds.
    pub fn new(bounds: ZoneBounds) -> Self {
        Self { bounds }
    }

    /// The geometric rule itself.
    #[inline]
    pub fn contains(&self, px: f64, pz: f64) -> bool {
        px.abs() <= self.bounds.half_width && pz >= self.bounds.sz_bot && pz <= self.bounds.sz_top
    }

    /// The rule exposed as a 0/1 probability so the fixed zone composes
    /// uniformly with the fitted variants.
    #[inline]
    pub fn evaluate(&self, px: f64, pz: f64) -> f64 {
        if self.contains(px, pz) {
            1.0
        } else {
            0.0
        }
    }

    /// The bounds the zone was built from.
    pub fn bounds(&self) -> ZoneBounds {
        self.bounds
    }
}
