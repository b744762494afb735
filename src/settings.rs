//! Game settings and preferences
//!
//! Persisted separately from game saves; nothing in here may influence a
//! simulation outcome, only its pacing and presentation.

use serde::{Deserialize, Serialize};

/// Auto-play pacing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl GameSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Slow => "Slow",
            GameSpeed::Normal => "Normal",
            GameSpeed::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(GameSpeed::Slow),
            "normal" | "med" | "medium" => Some(GameSpeed::Normal),
            "fast" => Some(GameSpeed::Fast),
            _ => None,
        }
    }

    /// Milliseconds between automatic pitches
    pub fn pitch_interval_ms(&self) -> u32 {
        match self {
            GameSpeed::Slow => 4_000,
            GameSpeed::Normal => 2_500,
            GameSpeed::Fast => 1_200,
        }
    }
}

/// Player-facing preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Auto-play pacing
    pub speed: GameSpeed,
    /// Dispatch pitches automatically (off = manual pitch button)
    pub auto_play: bool,
    /// Feed announcer lines to the audio collaborator
    pub announcer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: GameSpeed::Normal,
            auto_play: true,
            announcer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_round_trips() {
        for speed in [GameSpeed::Slow, GameSpeed::Normal, GameSpeed::Fast] {
            assert_eq!(GameSpeed::from_str(speed.as_str()), Some(speed));
        }
        assert_eq!(GameSpeed::from_str("warp"), None);
    }

    #[test]
    fn test_faster_speeds_shorten_interval() {
        assert!(GameSpeed::Slow.pitch_interval_ms() > GameSpeed::Normal.pitch_interval_ms());
        assert!(GameSpeed::Normal.pitch_interval_ms() > GameSpeed::Fast.pitch_interval_ms());
    }
}
