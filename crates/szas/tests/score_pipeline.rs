//! End-to-end tests for the scoring and surface operations.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use szas::data::{BatSide, Call, Decision, PitchRecord};
use szas::error::{SampleClass, SzasError};
use szas::testing::synthetic_at_bats;
use szas::zone::{CalledZone, SwingZone};
use szas::{score, surfaces, PitchFilter, SzasConfig};

fn base_record(px: f64, pz: f64, decision: Decision, at_bat: u16) -> PitchRecord {
    PitchRecord {
        px,
        pz,
        decision,
        umpire: 1,
        batter: 2,
        side: BatSide::Right,
        season: 2024,
        sz_top: 3.5,
        sz_bot: 1.5,
        game_id: 1,
        at_bat,
        pitch_number: 1,
    }
}

/// `n_takes` takes called by the rulebook plus a comfortable swing sample.
fn hand_built_collection(n_takes: usize) -> Vec<PitchRecord> {
    let mut pitches = Vec::new();
    let mut at_bat = 0u16;

    for i in 0..n_takes {
        // Spiral-ish coverage of the window.
        let px = -1.4 + (i % 29) as f64 * 0.1;
        let pz = 1.1 + (i % 31) as f64 * 0.11;
        let in_zone = px.abs() <= 0.83 && (1.5..=3.5).contains(&pz);
        let call = if in_zone { Call::Strike } else { Call::Ball };
        pitches.push(base_record(px, pz, Decision::Take(call), at_bat));
        at_bat = at_bat.wrapping_add(1);
    }

    for i in 0..250 {
        let px = -0.7 + (i % 15) as f64 * 0.1;
        let pz = 1.8 + (i % 17) as f64 * 0.1;
        pitches.push(base_record(px, pz, Decision::Swing, at_bat));
        at_bat = at_bat.wrapping_add(1);
    }

    pitches
}

#[test]
fn score_is_in_unit_interval_with_consistent_stats() {
    let pitches = synthetic_at_bats(300, 1, 42);
    let report = score(&pitches, &PitchFilter::new(), &SzasConfig::default()).unwrap();

    assert!((0.0..=1.0).contains(&report.szas), "szas = {}", report.szas);
    for iou in [
        report.components.iou_fixed_called,
        report.components.iou_fixed_swing,
        report.components.iou_called_swing,
    ] {
        assert!((0.0..=1.0).contains(&iou));
    }
    assert!(report.components.divergence_called >= 0.0);
    assert!(report.components.divergence_swing >= 0.0);
    assert!((0.0..=1.0).contains(&report.components.influence_bias));

    assert_eq!(
        report.stats.takes + report.stats.swings,
        report.stats.total
    );
    assert_eq!(
        report.stats.called_strikes + report.stats.balls,
        report.stats.takes
    );

    // Synthetic data has mass everywhere; all three centroids exist.
    assert!(report.centroids.fixed.is_some());
    assert!(report.centroids.called.is_some());
    assert!(report.centroids.swing.is_some());

    // Bias only ever shrinks the overlap mean.
    let mean_iou = (report.components.iou_fixed_called
        + report.components.iou_fixed_swing
        + report.components.iou_called_swing)
        / 3.0;
    assert!(report.szas <= mean_iou + 1e-12);
}

#[test]
fn synthetic_zones_agree_reasonably() {
    // The synthetic umpire follows the rulebook, so the fixed/called
    // overlap should dominate the report.
    let pitches = synthetic_at_bats(400, 1, 7);
    let report = score(&pitches, &PitchFilter::new(), &SzasConfig::default()).unwrap();
    assert!(
        report.components.iou_fixed_called > 0.5,
        "iou_fixed_called = {}",
        report.components.iou_fixed_called
    );
}

#[rstest]
#[case(99, false)]
#[case(100, true)]
fn takes_minimum_boundary(#[case] n_takes: usize, #[case] should_fit: bool) {
    let pitches = hand_built_collection(n_takes);
    let result = score(&pitches, &PitchFilter::new(), &SzasConfig::default());

    if should_fit {
        assert!(result.is_ok(), "unexpected error: {:?}", result.err());
    } else {
        assert_eq!(
            result.unwrap_err(),
            SzasError::InsufficientData {
                class: SampleClass::Takes,
                available: 99,
                required: 100,
            }
        );
    }
}

#[test]
fn swings_minimum_is_reported_with_counts() {
    // Plenty of takes, too few swings.
    let mut pitches = hand_built_collection(150);
    pitches.retain(|p| p.is_take());
    for i in 0..50 {
        pitches.push(base_record(0.0, 2.5, Decision::Swing, 1000 + i as u16));
    }

    let err = score(&pitches, &PitchFilter::new(), &SzasConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SzasError::InsufficientData {
            class: SampleClass::Swings,
            available: 50,
            required: 200,
        }
    );
}

#[test]
fn scoring_is_deterministic() {
    let pitches = synthetic_at_bats(250, 1, 11);
    let config = SzasConfig::default();
    let first = score(&pitches, &PitchFilter::new(), &config).unwrap();
    let second = score(&pitches, &PitchFilter::new(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fit_order_does_not_leak_between_models() {
    // Fit the two models in both orders; each fit only sees its own data,
    // so order must not matter.
    let pitches = synthetic_at_bats(250, 1, 13);
    let takes: Vec<&PitchRecord> = pitches.iter().filter(|p| p.is_take()).collect();
    let swings: Vec<&PitchRecord> = pitches.iter().filter(|p| p.is_swing()).collect();
    let params = szas::fit::LogisticParams::default();

    let called_first = CalledZone::fit(&takes, &params).unwrap();
    let _swing_after = SwingZone::fit(&swings).unwrap();

    let swing_first = SwingZone::fit(&swings).unwrap();
    let called_after = CalledZone::fit(&takes, &params).unwrap();

    for &(px, pz) in &[(0.0, 2.5), (0.8, 3.2), (-1.2, 1.3)] {
        assert_abs_diff_eq!(
            called_first.evaluate(px, pz),
            called_after.evaluate(px, pz),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            swing_first.density(px, pz),
            _swing_after.density(px, pz),
            epsilon = 1e-15
        );
    }
}

#[test]
fn conflicting_side_filter_is_surfaced() {
    // Synthetic batters always bat right.
    let pitches = synthetic_at_bats(250, 1, 17);
    let filter = PitchFilter::new().with_batter(1).with_side(BatSide::Left);
    let err = score(&pitches, &filter, &SzasConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SzasError::ConflictingSideFilter {
            batter: 1,
            side: BatSide::Left
        }
    );
}

#[test]
fn surface_operation_matches_grid_and_inputs() {
    let pitches = synthetic_at_bats(300, 1, 23);
    let config = SzasConfig::default();
    let result = surfaces(&pitches, &PitchFilter::new(), &config).unwrap();

    assert_eq!(result.x_values.len(), config.grid.nx);
    assert_eq!(result.z_values.len(), config.grid.nz);
    for surface in [&result.fixed, &result.called, &result.swing] {
        assert_eq!(surface.values().dim(), (config.grid.nz, config.grid.nx));
        assert!(surface.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    // The swing surface is peak-normalized: its maximum is exactly 1.
    let swing_max = result
        .swing
        .values()
        .iter()
        .fold(0.0f64, |acc, &v| acc.max(v));
    assert_abs_diff_eq!(swing_max, 1.0, epsilon = 1e-12);

    // Overlay locations mirror the filtered inputs.
    let n_takes = pitches.iter().filter(|p| p.is_take()).count();
    let n_swings = pitches.iter().filter(|p| p.is_swing()).count();
    assert_eq!(result.locations.takes.len(), n_takes);
    assert_eq!(result.locations.swings.len(), n_swings);
}

#[test]
fn report_serializes_for_the_api_layer() {
    let pitches = synthetic_at_bats(250, 1, 29);
    let report = score(&pitches, &PitchFilter::new(), &SzasConfig::default()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"szas\""));
    assert!(json.contains("\"interpretation\""));
}
