//! Per-batter and aggregate influence analysis.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::data::{PitchFilter, PitchRecord, PlayerId};
use crate::error::{SampleClass, SzasError};
use crate::fit::{LogisticModel, LogisticParams};
use crate::utils::run_with_threads;

use super::sequence::{analyzable_takes, qualifying_sequences, SequencedTake};

/// Swing rate above which a batter counts as a freeswinger.
const FREESWINGER_RATE: f64 = 0.55;

/// Swing rate below which a batter counts as patient.
const PATIENT_RATE: f64 = 0.45;

/// Feature layout for the influence fit:
/// `[1, px, pz, px², pz², prior_swing_rate]`.
const N_FEATURES: usize = 6;
const SWING_RATE_TERM: usize = 5;

// =============================================================================
// Parameters
// =============================================================================

/// Thresholds and fit parameters for the influence analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceParams {
    /// Shortest at-bat worth analyzing. Default: 4 pitches.
    pub min_sequence_pitches: usize,
    /// Qualifying at-bats required per batter. Default: 10.
    pub min_sequences: usize,
    /// Analyzable takes required per batter. Default: 20.
    pub min_takes: usize,
    /// Parameters for the logistic fits.
    pub logistic: LogisticParams,
}

impl Default for InfluenceParams {
    fn default() -> Self {
        Self {
            min_sequence_pitches: 4,
            min_sequences: 10,
            min_takes: 20,
            logistic: LogisticParams::default(),
        }
    }
}

// =============================================================================
// Per-Batter Analysis
// =============================================================================

/// A batter's swing-rate profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingRateStats {
    /// Swing rate over every filtered pitch for the batter.
    pub overall_swing_rate: f64,
    /// Swing rate within qualifying at-bats only.
    pub long_sequence_swing_rate: f64,
    pub total_takes: usize,
    pub total_swings: usize,
    /// Overall swing rate above 0.55.
    pub is_freeswinger: bool,
    /// Overall swing rate below 0.45.
    pub is_patient: bool,
}

/// Called-strike rates after splitting edge takes at the median prior
/// swing rate. Only produced when both halves are populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSplit {
    /// Strike rate on takes following an above-median swing rate.
    pub high_swing_strike_rate: f64,
    /// Strike rate on takes following an at-or-below-median swing rate.
    pub low_swing_strike_rate: f64,
    pub difference: f64,
    pub high_count: usize,
    pub low_count: usize,
}

/// One batter's influence analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceResult {
    pub batter: PlayerId,
    /// Qualifying at-bats analyzed.
    pub n_sequences: usize,
    /// Takes with a defined prior swing rate.
    pub n_takes: usize,
    /// Fitted coefficient on the prior swing rate. Negative supports the
    /// freeswinger hypothesis (earlier swings make a taken pitch likelier
    /// to be called a ball).
    pub coefficient: f64,
    /// `exp(coefficient)`.
    pub odds_ratio: f64,
    /// Classification accuracy of the location-only fit.
    pub baseline_accuracy: f64,
    /// Classification accuracy with the prior swing rate added.
    pub model_accuracy: f64,
    /// `model_accuracy − baseline_accuracy`.
    pub accuracy_gain: f64,
    pub stats: SwingRateStats,
    /// Edge-zone split check, when enough borderline takes exist.
    pub edge: Option<EdgeSplit>,
}

/// Minimum edge takes before the split check is attempted.
const MIN_EDGE_TAKES: usize = 15;

/// Minimum takes per half of the edge split.
const MIN_EDGE_HALF: usize = 5;

/// Horizontal band treated as borderline, feet from center.
const EDGE_X_INNER: f64 = 0.6;
const EDGE_X_OUTER: f64 = 1.0;

/// Vertical margin around the batter's bounds treated as borderline, feet.
const EDGE_Z_MARGIN: f64 = 0.3;

fn is_edge(record: &PitchRecord) -> bool {
    let x = record.px.abs();
    (x > EDGE_X_INNER && x < EDGE_X_OUTER)
        || (record.pz - record.sz_top).abs() < EDGE_Z_MARGIN
        || (record.pz - record.sz_bot).abs() < EDGE_Z_MARGIN
}

/// Analyze one batter: does their demonstrated swing rate earlier in an
/// at-bat move the call on a later take, after controlling for location?
///
/// # Errors
///
/// [`SzasError::InsufficientData`] naming
/// [`SampleClass::QualifyingAtBats`] or [`SampleClass::AnalyzableTakes`]
/// when the batter lacks history, and [`SzasError::DegenerateFit`] when a
/// fit collapses. A shortfall is a per-batter failure, never a degenerate
/// coefficient.
pub fn analyze_batter(
    pitches: &[PitchRecord],
    batter: PlayerId,
    season: Option<u16>,
    params: &InfluenceParams,
) -> Result<InfluenceResult, SzasError> {
    let mut filter = PitchFilter::new().with_batter(batter);
    filter.season = season;
    let records = filter.apply(pitches)?;

    let sequences = qualifying_sequences(&records, params.min_sequence_pitches);
    if sequences.len() < params.min_sequences {
        return Err(SzasError::insufficient(
            SampleClass::QualifyingAtBats,
            sequences.len(),
            params.min_sequences,
        ));
    }

    let takes = analyzable_takes(&sequences);
    if takes.len() < params.min_takes {
        return Err(SzasError::insufficient(
            SampleClass::AnalyzableTakes,
            takes.len(),
            params.min_takes,
        ));
    }

    let n = takes.len();
    let mut x = Array2::<f64>::zeros((n, N_FEATURES));
    let mut x_location = Array2::<f64>::zeros((n, N_FEATURES - 1));
    let mut y = Array1::<f64>::zeros(n);
    for (i, take) in takes.iter().enumerate() {
        let p = take.record;
        let row = [1.0, p.px, p.pz, p.px * p.px, p.pz * p.pz];
        for (j, value) in row.iter().enumerate() {
            x[[i, j]] = *value;
            x_location[[i, j]] = *value;
        }
        x[[i, SWING_RATE_TERM]] = take.prior_swing_rate;
        y[i] = if p.is_called_strike() { 1.0 } else { 0.0 };
    }

    let baseline = LogisticModel::fit(
        x_location.view(),
        y.view(),
        &params.logistic,
        "influence baseline",
    )?;
    let model = LogisticModel::fit(x.view(), y.view(), &params.logistic, "influence")?;

    let coefficient = model.coefficient(SWING_RATE_TERM);
    let baseline_accuracy = baseline.accuracy(x_location.view(), y.view());
    let model_accuracy = model.accuracy(x.view(), y.view());

    let stats = swing_rate_stats(&records, &sequences);
    let edge = edge_split(&takes);

    tracing::debug!(
        batter,
        coefficient,
        n_sequences = sequences.len(),
        n_takes = n,
        "influence fit"
    );

    Ok(InfluenceResult {
        batter,
        n_sequences: sequences.len(),
        n_takes: n,
        coefficient,
        odds_ratio: coefficient.exp(),
        baseline_accuracy,
        model_accuracy,
        accuracy_gain: model_accuracy - baseline_accuracy,
        stats,
        edge,
    })
}

fn swing_rate_stats(
    records: &[&PitchRecord],
    sequences: &[Vec<&PitchRecord>],
) -> SwingRateStats {
    let total_swings = records.iter().filter(|p| p.is_swing()).count();
    let total_takes = records.len() - total_swings;
    let overall = if records.is_empty() {
        0.0
    } else {
        total_swings as f64 / records.len() as f64
    };

    let long_total: usize = sequences.iter().map(|s| s.len()).sum();
    let long_swings: usize = sequences
        .iter()
        .flat_map(|s| s.iter())
        .filter(|p| p.is_swing())
        .count();
    let long_rate = if long_total == 0 {
        0.0
    } else {
        long_swings as f64 / long_total as f64
    };

    SwingRateStats {
        overall_swing_rate: overall,
        long_sequence_swing_rate: long_rate,
        total_takes,
        total_swings,
        is_freeswinger: overall > FREESWINGER_RATE,
        is_patient: overall < PATIENT_RATE,
    }
}

/// Model-free cross-check on borderline pitches: split edge takes at the
/// median prior swing rate and compare called-strike rates directly.
fn edge_split(takes: &[SequencedTake<'_>]) -> Option<EdgeSplit> {
    let edge: Vec<&SequencedTake<'_>> = takes.iter().filter(|t| is_edge(t.record)).collect();
    if edge.len() < MIN_EDGE_TAKES {
        return None;
    }

    let mut rates: Vec<f64> = edge.iter().map(|t| t.prior_swing_rate).collect();
    rates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = rates[rates.len() / 2];

    let (high, low): (Vec<_>, Vec<_>) = edge.iter().partition(|t| t.prior_swing_rate > median);
    if high.len() < MIN_EDGE_HALF || low.len() < MIN_EDGE_HALF {
        return None;
    }

    let strike_rate = |group: &[&&SequencedTake<'_>]| {
        group
            .iter()
            .filter(|t| t.record.is_called_strike())
            .count() as f64
            / group.len() as f64
    };
    let high_rate = strike_rate(&high);
    let low_rate = strike_rate(&low);

    Some(EdgeSplit {
        high_swing_strike_rate: high_rate,
        low_swing_strike_rate: low_rate,
        difference: high_rate - low_rate,
        high_count: high.len(),
        low_count: low.len(),
    })
}

// =============================================================================
// Aggregation
// =============================================================================

/// A batter whose analysis failed, with the typed reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterFailure {
    pub batter: PlayerId,
    pub error: SzasError,
}

/// Influence analysis aggregated over many batters.
///
/// Means and spread cover the *successful* fits only; failures are kept
/// alongside with their reasons so success + failure counts always sum to
/// the batters requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateInfluenceResult {
    pub results: Vec<InfluenceResult>,
    pub failures: Vec<BatterFailure>,
    /// Mean prior-swing-rate coefficient over successes; absent when every
    /// batter failed.
    pub mean_coefficient: Option<f64>,
    /// Population standard deviation of the coefficients.
    pub coefficient_std: Option<f64>,
    pub mean_odds_ratio: Option<f64>,
    pub n_freeswingers: usize,
    pub n_patient: usize,
    /// Whether at least one batter produced a fit.
    pub ready: bool,
    pub interpretation: String,
}

impl AggregateInfluenceResult {
    pub fn n_succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn n_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn n_requested(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Analyze many batters and aggregate.
///
/// Per-batter fits are independent pure computations; they run in parallel
/// (`n_threads`: 0 = auto, 1 = sequential) and are collected by batter in
/// request order, so no fit shares state with another. Individual failures
/// are recorded, not fatal.
pub fn analyze_batters(
    pitches: &[PitchRecord],
    batters: &[PlayerId],
    season: Option<u16>,
    params: &InfluenceParams,
    n_threads: usize,
) -> AggregateInfluenceResult {
    let outcomes = run_with_threads(n_threads, |parallelism| {
        parallelism.maybe_par_map(batters.to_vec(), |batter| {
            (batter, analyze_batter(pitches, batter, season, params))
        })
    });

    let mut results = Vec::new();
    let mut failures = Vec::new();
    for (batter, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(error) => failures.push(BatterFailure { batter, error }),
        }
    }

    let (mean_coefficient, coefficient_std, mean_odds_ratio) = if results.is_empty() {
        (None, None, None)
    } else {
        let n = results.len() as f64;
        let mean = results.iter().map(|r| r.coefficient).sum::<f64>() / n;
        let variance = results
            .iter()
            .map(|r| (r.coefficient - mean).powi(2))
            .sum::<f64>()
            / n;
        let mean_odds = results.iter().map(|r| r.odds_ratio).sum::<f64>() / n;
        (Some(mean), Some(variance.sqrt()), Some(mean_odds))
    };

    let n_freeswingers = results.iter().filter(|r| r.stats.is_freeswinger).count();
    let n_patient = results.iter().filter(|r| r.stats.is_patient).count();
    let interpretation = interpret_aggregate(mean_coefficient);

    AggregateInfluenceResult {
        ready: !results.is_empty(),
        results,
        failures,
        mean_coefficient,
        coefficient_std,
        mean_odds_ratio,
        n_freeswingers,
        n_patient,
        interpretation,
    }
}

fn interpret_aggregate(mean_coefficient: Option<f64>) -> String {
    match mean_coefficient {
        None => "No batter produced a fit; supply more data or relax thresholds.".to_string(),
        Some(c) if c.abs() < 0.1 => {
            "Minimal evidence that calls are influenced by batter swing behavior.".to_string()
        }
        Some(c) if c < 0.0 => {
            "Evidence supporting the freeswinger effect: after earlier swings, taken pitches \
             are likelier to be called balls."
                .to_string()
        }
        Some(_) => {
            "Batters with higher swing rates see more called strikes, contrary to the \
             freeswinger hypothesis."
                .to_string()
        }
    }
}

/// Analyze the `top_n` batters with the most qualifying at-bats.
///
/// The ranking and the per-batter fits both honor `season` and `params`;
/// a request for more batters than qualify analyzes however many exist.
pub fn analyze_top_batters(
    pitches: &[PitchRecord],
    top_n: usize,
    season: Option<u16>,
    params: &InfluenceParams,
    n_threads: usize,
) -> AggregateInfluenceResult {
    let batters: Vec<PlayerId> = rank_batters(pitches, season, params, top_n)
        .into_iter()
        .map(|a| a.batter)
        .collect();
    analyze_batters(pitches, &batters, season, params, n_threads)
}

// =============================================================================
// Ranking
// =============================================================================

/// A batter with enough qualifying at-bats for influence analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterAvailability {
    pub batter: PlayerId,
    pub qualifying_sequences: usize,
    pub total_pitches: usize,
}

/// Rank batters by qualifying-at-bat count, most history first.
///
/// Serves top-N influence requests: batters below `min_sequences` are
/// omitted, and at most `top_n` entries return. Ties break toward the
/// lower batter id for determinism.
pub fn rank_batters(
    pitches: &[PitchRecord],
    season: Option<u16>,
    params: &InfluenceParams,
    top_n: usize,
) -> Vec<BatterAvailability> {
    use std::collections::HashMap;

    let mut by_batter: HashMap<PlayerId, Vec<&PitchRecord>> = HashMap::new();
    for pitch in pitches {
        if season.is_none_or(|s| pitch.season == s) {
            by_batter.entry(pitch.batter).or_default().push(pitch);
        }
    }

    let mut ranked: Vec<BatterAvailability> = by_batter
        .into_iter()
        .map(|(batter, records)| BatterAvailability {
            batter,
            qualifying_sequences: qualifying_sequences(&records, params.min_sequence_pitches)
                .len(),
            total_pitches: records.len(),
        })
        .filter(|a| a.qualifying_sequences >= params.min_sequences)
        .collect();

    ranked.sort_by(|a, b| {
        b.qualifying_sequences
            .cmp(&a.qualifying_sequences)
            .then(a.batter.cmp(&b.batter))
    });
    ranked.truncate(top_n);
    ranked
}
