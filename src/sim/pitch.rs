//! Pitch type selection and outcome resolution
//!
//! A pitch resolves in stages, each consuming one draw: pitch type from the
//! count bucket, then swing/take/in-play from the swing rate, then the branch
//! draw (foul-or-strike, ball-or-called-strike, or hit type). Strategy
//! modifiers scale the thresholds before any draw is compared; scaled
//! probabilities are clamped and hit-type ordering is preserved.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rng::GameRng;
use crate::sim::state::{Action, GameState, Hit, PitchOverride};
use crate::sim::strategy::{Stat, Strategy, modifier};

/// Pitch categories; the count biases which one gets thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchType {
    Fastball,
    Slider,
    Curveball,
    Changeup,
}

impl PitchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchType::Fastball => "fastball",
            PitchType::Slider => "slider",
            PitchType::Curveball => "curveball",
            PitchType::Changeup => "changeup",
        }
    }

    /// How tempting the pitch is to swing at
    pub fn swing_rate_mod(&self) -> f64 {
        match self {
            PitchType::Fastball => 1.1,
            PitchType::Slider => 1.0,
            PitchType::Curveball => 0.9,
            PitchType::Changeup => 0.95,
        }
    }
}

/// Count situation, from the pitcher's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountBucket {
    Even,
    PitcherAhead,
    BatterAhead,
}

fn count_bucket(balls: u8, strikes: u8) -> CountBucket {
    if strikes > balls {
        CountBucket::PitcherAhead
    } else if balls > strikes {
        CountBucket::BatterAhead
    } else {
        CountBucket::Even
    }
}

/// Map a `[0,100)` draw to a pitch type via the count bucket's cumulative
/// thresholds. Ahead in the count the pitcher can waste off-speed pitches;
/// behind, fastballs dominate.
pub fn select_pitch_type(balls: u8, strikes: u8, roll: u32) -> PitchType {
    debug_assert!(roll < 100);
    let cuts: [(u32, PitchType); 4] = match count_bucket(balls, strikes) {
        CountBucket::Even => [
            (50, PitchType::Fastball),
            (70, PitchType::Slider),
            (85, PitchType::Curveball),
            (100, PitchType::Changeup),
        ],
        CountBucket::PitcherAhead => [
            (30, PitchType::Fastball),
            (55, PitchType::Slider),
            (80, PitchType::Curveball),
            (100, PitchType::Changeup),
        ],
        CountBucket::BatterAhead => [
            (65, PitchType::Fastball),
            (80, PitchType::Slider),
            (90, PitchType::Curveball),
            (100, PitchType::Changeup),
        ],
    };
    for (cut, pitch) in cuts {
        if roll < cut {
            return pitch;
        }
    }
    PitchType::Changeup
}

/// Swing rate out of 1000 for the current strikes and pitch type
pub fn swing_rate(strikes: u8, pitch: PitchType) -> f64 {
    let base = BASE_SWING_RATE - SWING_RATE_PER_STRIKE * strikes as f64;
    (base * pitch.swing_rate_mod()).clamp(0.0, 1000.0)
}

/// Strike share of a swing, out of 100, after the strikeout modifier
fn swing_miss_cut(strategy: Strategy) -> f64 {
    (SWING_MISS_RATE * modifier(strategy, Stat::Strikeout)).clamp(0.0, 100.0)
}

/// Ball share of a taken pitch, out of 1000, after the walk modifier
fn take_ball_cut(strategy: Strategy) -> f64 {
    (TAKE_BALL_RATE * modifier(strategy, Stat::Walk)).clamp(0.0, 1000.0)
}

/// Where the in-play band starts, out of 1000 (920 for balanced play)
fn in_play_cutoff(strategy: Strategy) -> f64 {
    (1000.0 - IN_PLAY_RATE * modifier(strategy, Stat::Contact)).clamp(0.0, 1000.0)
}

/// Cumulative hit-type cuts `(homerun, triple, double)` out of 100.
/// Clamping keeps the cuts monotonic for any modifier values.
fn hit_type_cuts(strategy: Strategy, shifted: bool) -> (f64, f64, f64) {
    let hr = (HOMERUN_WIDTH * modifier(strategy, Stat::Homerun)).clamp(0.0, 100.0);
    let advance = modifier(strategy, Stat::Advance);
    let tri = (hr + TRIPLE_WIDTH * advance).clamp(hr, 100.0);
    let mut double_width = DOUBLE_WIDTH * advance;
    if shifted {
        // The shift takes away the gaps: would-be doubles become singles
        double_width *= SHIFT_DOUBLE_FACTOR;
    }
    let dbl = (tri + double_width).clamp(tri, 100.0);
    (hr, tri, dbl)
}

fn hit_for_roll(roll: f64, cuts: (f64, f64, f64)) -> Hit {
    let (hr, tri, dbl) = cuts;
    if roll < hr {
        Hit::Homerun
    } else if roll < tri {
        Hit::Triple
    } else if roll < dbl {
        Hit::Double
    } else {
        Hit::Single
    }
}

/// Resolve the next pitch into a reducer action.
///
/// Draw order is fixed (pitch type, main roll, branch roll) so that a given
/// seed always spends its draws identically. A pending `one_pitch_modifier`
/// replaces the whole distribution for this pitch; the reducer clears it
/// afterwards either way.
pub fn resolve_pitch(state: &GameState, rng: &mut GameRng) -> Action {
    let strategy = state.effective_strategy();

    if let Some(PitchOverride::Bunt) = state.one_pitch_modifier {
        // Squared to bunt: foul it off, miss it, or push it for a single.
        let roll = rng.roll(100);
        return if roll < 30 {
            Action::Foul
        } else if roll < 55 {
            Action::Strike
        } else {
            Action::Hit {
                hit: Hit::Single,
                strategy,
            }
        };
    }

    let pitch = select_pitch_type(state.balls, state.strikes, rng.roll(100));
    let roll = rng.roll(1000) as f64;
    let swing = swing_rate(state.strikes, pitch);

    if roll < swing {
        // Batter swings: miss or foul
        let second = rng.roll(100) as f64;
        if second < 100.0 - swing_miss_cut(strategy) {
            Action::Foul
        } else {
            Action::Strike
        }
    } else if roll < in_play_cutoff(strategy) {
        // Batter takes: ball or called strike
        let second = rng.roll(1000) as f64;
        if second < take_ball_cut(strategy) {
            Action::Ball
        } else {
            Action::Strike
        }
    } else {
        // Ball in play
        let second = rng.roll(100) as f64;
        let cuts = hit_type_cuts(strategy, state.defensive_shift);
        Action::Hit {
            hit: hit_for_roll(second, cuts),
            strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TeamConfig;

    fn fresh() -> GameState {
        GameState::new(
            &TeamConfig::placeholder("Away"),
            &TeamConfig::placeholder("Home"),
        )
    }

    #[test]
    fn test_pitch_selection_covers_table() {
        // Even count: thresholds at 50/70/85
        assert_eq!(select_pitch_type(0, 0, 0), PitchType::Fastball);
        assert_eq!(select_pitch_type(0, 0, 49), PitchType::Fastball);
        assert_eq!(select_pitch_type(0, 0, 50), PitchType::Slider);
        assert_eq!(select_pitch_type(0, 0, 84), PitchType::Curveball);
        assert_eq!(select_pitch_type(0, 0, 99), PitchType::Changeup);
    }

    #[test]
    fn test_ahead_in_count_means_more_offspeed() {
        // At 0-2 the fastball band shrinks to 30
        assert_eq!(select_pitch_type(0, 2, 29), PitchType::Fastball);
        assert_eq!(select_pitch_type(0, 2, 30), PitchType::Slider);
        // At 3-0 it grows to 65
        assert_eq!(select_pitch_type(3, 0, 64), PitchType::Fastball);
    }

    #[test]
    fn test_swing_rate_drops_with_strikes() {
        let s0 = swing_rate(0, PitchType::Slider);
        let s1 = swing_rate(1, PitchType::Slider);
        let s2 = swing_rate(2, PitchType::Slider);
        assert_eq!(s0, 500.0);
        assert_eq!(s1, 425.0);
        assert_eq!(s2, 350.0);
    }

    #[test]
    fn test_balanced_thresholds_match_reference() {
        assert_eq!(in_play_cutoff(Strategy::Balanced), 920.0);
        assert_eq!(swing_miss_cut(Strategy::Balanced), 70.0);
        assert_eq!(take_ball_cut(Strategy::Balanced), 600.0);
        let (hr, tri, dbl) = hit_type_cuts(Strategy::Balanced, false);
        assert_eq!((hr, tri, dbl), (13.0, 15.0, 35.0));
    }

    #[test]
    fn test_hit_cuts_stay_monotonic_for_all_strategies() {
        for strategy in Strategy::ALL {
            for shifted in [false, true] {
                let (hr, tri, dbl) = hit_type_cuts(strategy, shifted);
                assert!(hr >= 0.0 && hr <= tri && tri <= dbl && dbl <= 100.0);
            }
        }
    }

    #[test]
    fn test_hit_for_roll_uses_reference_bands() {
        let cuts = hit_type_cuts(Strategy::Balanced, false);
        assert_eq!(hit_for_roll(0.0, cuts), Hit::Homerun);
        assert_eq!(hit_for_roll(12.9, cuts), Hit::Homerun);
        assert_eq!(hit_for_roll(13.0, cuts), Hit::Triple);
        assert_eq!(hit_for_roll(15.0, cuts), Hit::Double);
        assert_eq!(hit_for_roll(34.9, cuts), Hit::Double);
        assert_eq!(hit_for_roll(35.0, cuts), Hit::Single);
        assert_eq!(hit_for_roll(99.0, cuts), Hit::Single);
    }

    #[test]
    fn test_shift_narrows_the_double_band() {
        let (_, tri, dbl) = hit_type_cuts(Strategy::Balanced, false);
        let (_, tri_s, dbl_s) = hit_type_cuts(Strategy::Balanced, true);
        assert_eq!(tri, tri_s);
        assert!(dbl_s < dbl);
    }

    #[test]
    fn test_resolver_is_deterministic() {
        let state = fresh();
        let mut a = GameRng::new(555);
        let mut b = GameRng::new(555);
        for _ in 0..200 {
            assert_eq!(resolve_pitch(&state, &mut a), resolve_pitch(&state, &mut b));
        }
    }

    #[test]
    fn test_bunt_override_limits_outcomes() {
        let mut state = fresh();
        state.one_pitch_modifier = Some(PitchOverride::Bunt);
        let mut rng = GameRng::new(9);
        for _ in 0..100 {
            match resolve_pitch(&state, &mut rng) {
                Action::Foul | Action::Strike => {}
                Action::Hit {
                    hit: Hit::Single, ..
                } => {}
                other => panic!("bunt pitch produced {other:?}"),
            }
        }
    }
}
