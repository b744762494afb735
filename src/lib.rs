//! Dugout - a deterministic pitch-by-pitch baseball simulation engine
//!
//! Core modules:
//! - `sim`: deterministic simulation (pitch resolution, state machine,
//!   manager decisions, auto-play pacing, replay)
//! - `settings`: game speed and presentation preferences
//!
//! Every gameplay outcome flows through one seeded generator, so a seed plus
//! the sequence of manager decisions always reproduces the same game. That is
//! what makes save/resume, share-by-seed, and replay work.

pub mod settings;
pub mod sim;

pub use settings::{GameSpeed, Settings};

/// Engine tuning constants
pub mod consts {
    /// Batters per lineup
    pub const LINEUP_SIZE: usize = 9;
    /// Innings in a regulation game
    pub const REGULATION_INNINGS: u32 = 9;

    /// Swing rate at zero strikes, out of 1000
    pub const BASE_SWING_RATE: f64 = 500.0;
    /// Swing rate lost per strike in the count
    pub const SWING_RATE_PER_STRIKE: f64 = 75.0;
    /// Strike share of a swing, out of 100, before the strikeout modifier
    pub const SWING_MISS_RATE: f64 = 70.0;
    /// Ball share of a taken pitch, out of 1000, before the walk modifier
    pub const TAKE_BALL_RATE: f64 = 600.0;
    /// In-play band width, out of 1000, before the contact modifier
    pub const IN_PLAY_RATE: f64 = 80.0;

    /// Hit-type widths out of 100, before strategy scaling
    pub const HOMERUN_WIDTH: f64 = 13.0;
    pub const TRIPLE_WIDTH: f64 = 2.0;
    pub const DOUBLE_WIDTH: f64 = 20.0;
    /// Double width multiplier while the defensive shift is on
    pub const SHIFT_DOUBLE_FACTOR: f64 = 0.6;

    /// Steal success probability before the steal modifier
    pub const STEAL_SUCCESS_RATE: f64 = 0.72;

    /// Manager decision countdown
    pub const DECISION_DEADLINE_MS: u32 = 10_000;
    /// Hold between half-innings
    pub const HALF_INNING_HOLD_MS: u32 = 3_000;
    /// Longer hold for the seventh-inning stretch
    pub const STRETCH_HOLD_MS: u32 = 7_000;
}

/// Parse a shareable seed string (base 36, lowercase, as shown to players).
///
/// Returns `None` for anything that does not fit a 32-bit seed; callers
/// decide whether that is recoverable (new game) or fatal (replay).
pub fn parse_seed(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    u32::from_str_radix(text, 36).ok()
}

/// Format a seed the way `parse_seed` reads it back.
pub fn format_seed(seed: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if seed == 0 {
        return "0".into();
    }
    let mut n = seed;
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}
