//! At-bat grouping and prior swing rates.
//!
//! The influence analysis asks what the umpire has seen *earlier in the
//! same at-bat*: for each taken pitch from the second pitch on, the
//! batter's swing rate over the preceding pitches of that at-bat.

use std::collections::HashMap;

use crate::data::PitchRecord;

/// A take carrying the batter's demonstrated swing rate up to (not
/// including) that pitch.
#[derive(Debug, Clone, Copy)]
pub struct SequencedTake<'a> {
    pub record: &'a PitchRecord,
    /// Swings among pitches `1..k−1` of the at-bat divided by `k−1`.
    pub prior_swing_rate: f64,
}

/// Group records into at-bats and keep those long enough to carry signal.
///
/// Records are grouped by `(game_id, at_bat)`, ordered by `pitch_number`
/// within each at-bat, and at-bats shorter than `min_pitches` are dropped.
/// Output order is deterministic (by game, then at-bat number) regardless
/// of input order.
pub fn qualifying_sequences<'a>(
    records: &[&'a PitchRecord],
    min_pitches: usize,
) -> Vec<Vec<&'a PitchRecord>> {
    let mut by_at_bat: HashMap<(u32, u16), Vec<&PitchRecord>> = HashMap::new();
    for &record in records {
        by_at_bat
            .entry((record.game_id, record.at_bat))
            .or_default()
            .push(record);
    }

    let mut keys: Vec<(u32, u16)> = by_at_bat
        .iter()
        .filter(|(_, pitches)| pitches.len() >= min_pitches)
        .map(|(&key, _)| key)
        .collect();
    keys.sort_unstable();

    keys.into_iter()
        .map(|key| {
            let mut sequence = by_at_bat.remove(&key).unwrap_or_default();
            sequence.sort_by_key(|p| p.pitch_number);
            sequence
        })
        .collect()
}

/// Extract the analyzable takes from qualifying sequences.
///
/// The first pitch of an at-bat has no history and is always skipped; a
/// later pitch contributes iff it is a take.
pub fn analyzable_takes<'a>(sequences: &[Vec<&'a PitchRecord>]) -> Vec<SequencedTake<'a>> {
    let mut takes = Vec::new();
    for sequence in sequences {
        let mut swings_so_far = 0usize;
        for (i, &record) in sequence.iter().enumerate() {
            if i > 0 && record.is_take() {
                takes.push(SequencedTake {
                    record,
                    prior_swing_rate: swings_so_far as f64 / i as f64,
                });
            }
            if record.is_swing() {
                swings_so_far += 1;
            }
        }
    }
    takes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BatSide, Call, Decision};
    use approx::assert_abs_diff_eq;

    fn pitch(game_id: u32, at_bat: u16, pitch_number: u8, decision: Decision) -> PitchRecord {
        PitchRecord {
            px: 0.0,
            pz: 2.5,
            decision,
            umpire: 1,
            batter: 2,
            side: BatSide::Right,
            season: 2024,
            sz_top: 3.5,
            sz_bot: 1.5,
            game_id,
            at_bat,
            pitch_number,
        }
    }

    #[test]
    fn short_at_bats_are_dropped() {
        let records = vec![
            pitch(1, 1, 1, Decision::Swing),
            pitch(1, 1, 2, Decision::Swing),
            pitch(1, 1, 3, Decision::Take(Call::Ball)),
            pitch(1, 2, 1, Decision::Swing),
            pitch(1, 2, 2, Decision::Swing),
            pitch(1, 2, 3, Decision::Swing),
            pitch(1, 2, 4, Decision::Take(Call::Strike)),
        ];
        let refs: Vec<&PitchRecord> = records.iter().collect();
        let sequences = qualifying_sequences(&refs, 4);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].len(), 4);
        assert_eq!(sequences[0][0].at_bat, 2);
    }

    #[test]
    fn sequences_are_ordered_by_pitch_number() {
        // Shuffled input still yields in-order sequences.
        let records = vec![
            pitch(1, 1, 3, Decision::Take(Call::Ball)),
            pitch(1, 1, 1, Decision::Swing),
            pitch(1, 1, 4, Decision::Take(Call::Strike)),
            pitch(1, 1, 2, Decision::Swing),
        ];
        let refs: Vec<&PitchRecord> = records.iter().collect();
        let sequences = qualifying_sequences(&refs, 4);
        let numbers: Vec<u8> = sequences[0].iter().map(|p| p.pitch_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn prior_swing_rate_counts_only_earlier_pitches() {
        // swing, swing, take, take: the takes see rates 2/2 and 2/3.
        let records = vec![
            pitch(1, 1, 1, Decision::Swing),
            pitch(1, 1, 2, Decision::Swing),
            pitch(1, 1, 3, Decision::Take(Call::Ball)),
            pitch(1, 1, 4, Decision::Take(Call::Strike)),
        ];
        let refs: Vec<&PitchRecord> = records.iter().collect();
        let sequences = qualifying_sequences(&refs, 4);
        let takes = analyzable_takes(&sequences);
        assert_eq!(takes.len(), 2);
        assert_abs_diff_eq!(takes[0].prior_swing_rate, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(takes[1].prior_swing_rate, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn first_pitch_take_is_excluded() {
        let records = vec![
            pitch(1, 1, 1, Decision::Take(Call::Strike)),
            pitch(1, 1, 2, Decision::Take(Call::Ball)),
            pitch(1, 1, 3, Decision::Swing),
            pitch(1, 1, 4, Decision::Take(Call::Ball)),
        ];
        let refs: Vec<&PitchRecord> = records.iter().collect();
        let sequences = qualifying_sequences(&refs, 4);
        let takes = analyzable_takes(&sequences);
        // Pitches 2 and 4 analyzable; pitch 1 has no history.
        assert_eq!(takes.len(), 2);
        assert_abs_diff_eq!(takes[0].prior_swing_rate, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(takes[1].prior_swing_rate, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn same_at_bat_number_in_different_games_stays_separate() {
        let records = vec![
            pitch(1, 7, 1, Decision::Swing),
            pitch(1, 7, 2, Decision::Swing),
            pitch(1, 7, 3, Decision::Swing),
            pitch(1, 7, 4, Decision::Swing),
            pitch(2, 7, 1, Decision::Take(Call::Ball)),
            pitch(2, 7, 2, Decision::Take(Call::Ball)),
            pitch(2, 7, 3, Decision::Take(Call::Ball)),
            pitch(2, 7, 4, Decision::Take(Call::Ball)),
        ];
        let refs: Vec<&PitchRecord> = records.iter().collect();
        let sequences = qualifying_sequences(&refs, 4);
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0][0].game_id, 1);
        assert_eq!(sequences[1][0].game_id, 2);
    }
}
