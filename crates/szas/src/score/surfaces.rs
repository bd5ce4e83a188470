//! The surface operation: rasterized zones for rendering.

use serde::{Deserialize, Serialize};

use crate::config::SzasConfig;
use crate::data::{split_pitches, PitchFilter, PitchRecord};
use crate::error::SzasError;
use crate::surface::{Surface, ZoneGrid};
use crate::zone::{FixedZone, Zone, ZoneBounds};

use super::build_zones;

/// A taken pitch with its call, for overlay rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakePoint {
    pub px: f64,
    pub pz: f64,
    pub called_strike: bool,
}

/// A swung-at pitch location, for overlay rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub px: f64,
    pub pz: f64,
}

/// The observed pitch locations behind the fitted surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchLocations {
    pub takes: Vec<TakePoint>,
    pub swings: Vec<SwingPoint>,
}

/// The three rasterized surfaces plus everything a renderer needs to draw
/// them: grid coordinates, zone bounds, and the underlying pitch locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSurfaces {
    /// Horizontal grid sample positions, feet.
    pub x_values: Vec<f64>,
    /// Vertical grid sample positions, feet.
    pub z_values: Vec<f64>,
    pub fixed: Surface,
    pub called: Surface,
    pub swing: Surface,
    pub zone_bounds: ZoneBounds,
    pub locations: PitchLocations,
}

/// Rasterize the three zones for a filtered collection.
///
/// Same filter semantics, minimum-sample policy, and fitting path as
/// [`score`](crate::score::score); this returns the surfaces themselves
/// instead of folding them into a scalar.
///
/// # Errors
///
/// As for [`score`](crate::score::score).
pub fn surfaces(
    pitches: &[PitchRecord],
    filter: &PitchFilter,
    config: &SzasConfig,
) -> Result<ZoneSurfaces, SzasError> {
    let split = split_pitches(pitches, filter)?;
    split.require(config.min_takes, config.min_swings)?;

    let (bounds, called, swing) = build_zones(&split, config)?;
    let grid = ZoneGrid::new(&config.grid);

    let locations = PitchLocations {
        takes: split
            .takes
            .iter()
            .map(|t| TakePoint {
                px: t.px,
                pz: t.pz,
                called_strike: t.is_called_strike(),
            })
            .collect(),
        swings: split
            .swings
            .iter()
            .map(|s| SwingPoint { px: s.px, pz: s.pz })
            .collect(),
    };

    Ok(ZoneSurfaces {
        x_values: grid.xs().to_vec(),
        z_values: grid.zs().to_vec(),
        fixed: grid.surface(&Zone::Fixed(FixedZone::new(bounds))),
        called: grid.surface(&Zone::Called(called)),
        swing: grid.surface(&Zone::Swing(swing)),
        zone_bounds: bounds,
        locations,
    })
}
