//! The composite alignment score.
//!
//! [`score`] runs the full pipeline for one request: filter and split the
//! collection, fit the three zones, rasterize them onto the shared grid,
//! compare every pair, fold the overlaps and the confound bias into one
//! number. [`surfaces`] exposes the rasterized surfaces themselves for
//! rendering. Both are pure functions of the pitch collection, the filter,
//! and the config — no ambient state, nothing cached between calls.

mod bias;
mod surfaces;

use serde::{Deserialize, Serialize};

pub use bias::influence_bias;
pub use surfaces::{surfaces, PitchLocations, SwingPoint, TakePoint, ZoneSurfaces};

use crate::config::SzasConfig;
use crate::data::{split_pitches, Call, PitchFilter, PitchRecord, SplitPitches};
use crate::error::SzasError;
use crate::surface::{centroid, divergence, iou, Centroid, ZoneGrid};
use crate::zone::{CalledZone, FixedZone, SwingZone, Zone, ZoneBounds};

/// Input sample counts for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleStats {
    pub total: usize,
    pub takes: usize,
    pub swings: usize,
    pub called_strikes: usize,
    pub balls: usize,
}

impl SampleStats {
    fn from_split(split: &SplitPitches<'_>) -> Self {
        let called_strikes = split
            .takes
            .iter()
            .filter(|t| t.call() == Some(Call::Strike))
            .count();
        Self {
            total: split.total(),
            takes: split.takes.len(),
            swings: split.swings.len(),
            called_strikes,
            balls: split.takes.len() - called_strikes,
        }
    }
}

/// The pairwise statistics feeding the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SzasComponents {
    /// Overlap between the rulebook zone and the umpire's called zone.
    pub iou_fixed_called: f64,
    /// Overlap between the rulebook zone and the batter's swing zone.
    pub iou_fixed_swing: f64,
    /// Overlap between the called zone and the swing zone.
    pub iou_called_swing: f64,
    /// Mean |Δ| between the called surface and the rulebook surface.
    pub divergence_called: f64,
    /// Mean |Δ| between the swing surface and the rulebook surface.
    pub divergence_swing: f64,
    /// Confound penalty from [`influence_bias`], already in [0, 1].
    pub influence_bias: f64,
}

/// The three zone centroids. Each is absent when its surface carries no
/// mass — never coerced to an origin point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneCentroids {
    pub fixed: Option<Centroid>,
    pub called: Option<Centroid>,
    pub swing: Option<Centroid>,
}

/// Result of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SzasReport {
    /// The composite alignment score in [0, 1].
    pub szas: f64,
    pub components: SzasComponents,
    pub centroids: ZoneCentroids,
    /// Bounds the fixed zone was built from (batter-specific, or the
    /// filtered collection's mean).
    pub zone_bounds: ZoneBounds,
    pub stats: SampleStats,
    /// Human-readable summary for the presentation layer.
    pub interpretation: String,
}

/// Fit the called and swing zones for a request that has already passed the
/// minimum-sample policy. Shared by [`score`] and [`surfaces`].
pub(crate) fn build_zones(
    split: &SplitPitches<'_>,
    config: &SzasConfig,
) -> Result<(ZoneBounds, CalledZone, SwingZone), SzasError> {
    let bounds = ZoneBounds::from_records(
        split
            .takes
            .iter()
            .chain(split.swings.iter())
            .copied(),
    );
    let called = CalledZone::fit(&split.takes, &config.logistic)?;
    let swing = SwingZone::fit(&split.swings)?;
    Ok((bounds, called, swing))
}

/// Compute the composite alignment score for a filtered pitch collection.
///
/// # Errors
///
/// - [`SzasError::InsufficientData`] when either decision class is below
///   its minimum — the pipeline refuses to score rather than fabricate.
/// - [`SzasError::ConflictingSideFilter`] for contradictory filters.
/// - [`SzasError::DegenerateFit`] when a model cannot be fit from the data.
pub fn score(
    pitches: &[PitchRecord],
    filter: &PitchFilter,
    config: &SzasConfig,
) -> Result<SzasReport, SzasError> {
    let split = split_pitches(pitches, filter)?;
    split.require(config.min_takes, config.min_swings)?;

    let (bounds, called, swing) = build_zones(&split, config)?;
    let grid = ZoneGrid::new(&config.grid);

    let bias = influence_bias(&split.takes, &swing, &grid, config)?;

    let fixed_surface = grid.surface(&Zone::Fixed(FixedZone::new(bounds)));
    let called_surface = grid.surface(&Zone::Called(called));
    let swing_surface = grid.surface(&Zone::Swing(swing));

    let threshold = config.mask_threshold;
    let components = SzasComponents {
        iou_fixed_called: iou(&fixed_surface, &called_surface, threshold),
        iou_fixed_swing: iou(&fixed_surface, &swing_surface, threshold),
        iou_called_swing: iou(&called_surface, &swing_surface, threshold),
        divergence_called: divergence(&fixed_surface, &called_surface),
        divergence_swing: divergence(&fixed_surface, &swing_surface),
        influence_bias: bias,
    };

    let mean_iou = (components.iou_fixed_called
        + components.iou_fixed_swing
        + components.iou_called_swing)
        / 3.0;
    let szas = mean_iou * (1.0 - bias);

    let centroids = ZoneCentroids {
        fixed: centroid(&fixed_surface, &grid),
        called: centroid(&called_surface, &grid),
        swing: centroid(&swing_surface, &grid),
    };

    let stats = SampleStats::from_split(&split);
    let interpretation = interpret(szas, &components);

    tracing::info!(szas, takes = stats.takes, swings = stats.swings, "scored request");

    Ok(SzasReport {
        szas,
        components,
        centroids,
        zone_bounds: bounds,
        stats,
        interpretation,
    })
}

/// Summarize a score for human readers.
fn interpret(szas: f64, components: &SzasComponents) -> String {
    let quality = if szas >= 0.8 {
        "Excellent zone alignment - all three zones are highly consistent."
    } else if szas >= 0.6 {
        "Good zone alignment - moderate consistency across zones."
    } else if szas >= 0.4 {
        "Fair zone alignment - some divergence between zones."
    } else {
        "Poor zone alignment - significant divergence between zones."
    };

    let closer = if components.iou_fixed_called > components.iou_fixed_swing {
        "The called zone tracks the rulebook more closely than the swing zone."
    } else {
        "The swing zone tracks the rulebook more closely than the called zone."
    };

    format!("{quality} {closer}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretation_tiers() {
        let components = SzasComponents {
            iou_fixed_called: 0.9,
            iou_fixed_swing: 0.5,
            iou_called_swing: 0.6,
            divergence_called: 0.1,
            divergence_swing: 0.2,
            influence_bias: 0.0,
        };
        assert!(interpret(0.85, &components).starts_with("Excellent"));
        assert!(interpret(0.65, &components).starts_with("Good"));
        assert!(interpret(0.45, &components).starts_with("Fair"));
        assert!(interpret(0.1, &components).starts_with("Poor"));
        assert!(interpret(0.5, &components).contains("called zone tracks"));
    }

    #[test]
    fn sample_stats_count_calls() {
        use crate::data::{BatSide, Decision, PitchFilter};

        let mut pitches = Vec::new();
        for (i, decision) in [
            Decision::Take(Call::Strike),
            Decision::Take(Call::Ball),
            Decision::Take(Call::Ball),
            Decision::Swing,
        ]
        .into_iter()
        .enumerate()
        {
            pitches.push(PitchRecord {
                px: 0.0,
                pz: 2.5,
                decision,
                umpire: 1,
                batter: 2,
                side: BatSide::Right,
                season: 2024,
                sz_top: 3.5,
                sz_bot: 1.5,
                game_id: 1,
                at_bat: i as u16,
                pitch_number: 1,
            });
        }
        let split = split_pitches(&pitches, &PitchFilter::new()).unwrap();
        let stats = SampleStats::from_split(&split);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.takes, 3);
        assert_eq!(stats.swings, 1);
        assert_eq!(stats.called_strikes, 1);
        assert_eq!(stats.balls, 2);
    }
}
