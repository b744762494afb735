//! Seeded random source
//!
//! One generator per game session; every gameplay draw goes through `roll`,
//! so a fixed seed replays bit-for-bit across processes and time. Each draw
//! costs exactly one generator step, which lets the serialized `(seed, draws)`
//! snapshot fast-forward a fresh generator to the live position.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Deterministic integer generator with explicit save/restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RngSnapshot", into = "RngSnapshot")]
pub struct GameRng {
    seed: u32,
    draws: u64,
    rng: Pcg32,
}

/// Serialized form of a generator: seed plus draw count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    pub seed: u32,
    pub draws: u64,
}

impl GameRng {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            draws: 0,
            rng: Pcg32::seed_from_u64(seed as u64),
        }
    }

    /// Draw an integer in `[0, bound)`. Exactly one generator step.
    pub fn roll(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "roll bound must be positive");
        self.draws += 1;
        self.rng.next_u32() % bound
    }

    /// Reinitialize from a fresh seed, discarding all prior state.
    pub fn restore(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draws made since the last (re)seed
    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn snapshot(&self) -> RngSnapshot {
        RngSnapshot {
            seed: self.seed,
            draws: self.draws,
        }
    }
}

impl From<RngSnapshot> for GameRng {
    fn from(snap: RngSnapshot) -> Self {
        let mut rng = GameRng::new(snap.seed);
        // Fast-forward: every roll is one generator step, so replaying the
        // draw count lands on the identical internal state.
        for _ in 0..snap.draws {
            rng.rng.next_u32();
        }
        rng.draws = snap.draws;
        rng
    }
}

impl From<GameRng> for RngSnapshot {
    fn from(rng: GameRng) -> Self {
        rng.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = GameRng::new(12345);
        let mut b = GameRng::new(12345);
        for _ in 0..200 {
            assert_eq!(a.roll(1000), b.roll(1000));
        }
    }

    #[test]
    fn test_rolls_stay_in_bounds() {
        let mut rng = GameRng::new(7);
        for bound in [1u32, 2, 13, 100, 1000] {
            for _ in 0..100 {
                assert!(rng.roll(bound) < bound);
            }
        }
    }

    #[test]
    fn test_restore_discards_prior_state() {
        let mut a = GameRng::new(42);
        for _ in 0..50 {
            a.roll(100);
        }
        a.restore(42);
        let mut b = GameRng::new(42);
        assert_eq!(a.roll(100), b.roll(100));
        assert_eq!(a.draws(), b.draws());
    }

    #[test]
    fn test_snapshot_fast_forwards() {
        let mut live = GameRng::new(99);
        for _ in 0..37 {
            live.roll(360);
        }
        let json = serde_json::to_string(&live).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, live);
        assert_eq!(restored.roll(1000), live.roll(1000));
    }
}
