//! Synthetic pitch collections for tests and examples.
//!
//! Deterministic, seeded generation of pitch data with realistic structure:
//! at-bats of varying length, a batter who mostly swings inside the zone,
//! and an umpire who mostly follows the rulebook. The generated surfaces
//! are learnable by every model in the crate, which is what the tests need.

use rand::prelude::*;

use crate::data::{BatSide, Call, Decision, PitchRecord, PlayerId};

/// Umpire id used by all synthetic data.
pub const SYNTHETIC_UMPIRE: PlayerId = 9000;

/// Season year used by all synthetic data.
pub const SYNTHETIC_SEASON: u16 = 2024;

const ZONE_HALF_WIDTH: f64 = 0.83;
const ZONE_BOT: f64 = 1.5;
const ZONE_TOP: f64 = 3.5;

/// At-bats per synthetic game.
const AT_BATS_PER_GAME: u16 = 40;

fn in_zone(px: f64, pz: f64) -> bool {
    px.abs() <= ZONE_HALF_WIDTH && (ZONE_BOT..=ZONE_TOP).contains(&pz)
}

/// Generate `n_at_bats` at-bats (3–7 pitches each) for one batter.
///
/// The batter swings ~75 % inside the zone and ~12 % outside; the umpire
/// calls in-zone takes strikes ~92 % of the time and out-of-zone takes
/// strikes ~6 % of the time. Locations are uniform over a window slightly
/// wider than the zone. Fully deterministic for a given seed.
pub fn synthetic_at_bats(n_at_bats: usize, batter: PlayerId, seed: u64) -> Vec<PitchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pitches = Vec::new();

    for ab_index in 0..n_at_bats {
        let game_id = 500_000 + (ab_index as u32 / AT_BATS_PER_GAME as u32);
        let at_bat = (ab_index as u16 % AT_BATS_PER_GAME) + 1;
        let n_pitches = rng.random_range(3..=7);

        let sz_top = ZONE_TOP + (rng.random::<f64>() - 0.5) * 0.2;
        let sz_bot = ZONE_BOT + (rng.random::<f64>() - 0.5) * 0.2;

        for pitch_number in 1..=n_pitches {
            let px = (rng.random::<f64>() - 0.5) * 2.8;
            let pz = 1.1 + rng.random::<f64>() * 3.0;

            let p_swing = if in_zone(px, pz) { 0.75 } else { 0.12 };
            let decision = if rng.random::<f64>() < p_swing {
                Decision::Swing
            } else {
                let p_strike = if in_zone(px, pz) { 0.92 } else { 0.06 };
                let call = if rng.random::<f64>() < p_strike {
                    Call::Strike
                } else {
                    Call::Ball
                };
                Decision::Take(call)
            };

            pitches.push(PitchRecord {
                px,
                pz,
                decision,
                umpire: SYNTHETIC_UMPIRE,
                batter,
                side: BatSide::Right,
                season: SYNTHETIC_SEASON,
                sz_top,
                sz_bot,
                game_id,
                at_bat,
                pitch_number,
            });
        }
    }

    pitches
}

/// Generate a small league: `n_batters` batters (ids `1..=n_batters`), each
/// with `at_bats_per_batter` at-bats, one derived seed per batter.
pub fn synthetic_league(
    n_batters: usize,
    at_bats_per_batter: usize,
    seed: u64,
) -> Vec<PitchRecord> {
    (1..=n_batters as PlayerId)
        .flat_map(|batter| {
            synthetic_at_bats(at_bats_per_batter, batter, seed ^ (batter as u64).wrapping_mul(0x9e37_79b9))
        })
        .collect()
}
