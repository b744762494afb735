//! Game state and core simulation types
//!
//! All state that must be persisted for save/resume and determinism lives in
//! `GameState`. It is mutated only by the reducer, one action at a time, and
//! freezes once `game_over` is set.

use serde::{Deserialize, Serialize};

use crate::consts::LINEUP_SIZE;
use crate::sim::strategy::Strategy;

/// Which team is which; also indexes `score`, `teams`, `lineups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    /// Visiting team, bats in the top half
    Away,
    /// Home team, bats in the bottom half
    Home,
}

impl TeamSide {
    pub fn idx(&self) -> usize {
        match self {
            TeamSide::Away => 0,
            TeamSide::Home => 1,
        }
    }

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }

    /// "top" / "bottom" for announcer lines
    pub fn half_name(&self) -> &'static str {
        match self {
            TeamSide::Away => "top",
            TeamSide::Home => "bottom",
        }
    }
}

/// Batted-ball (or walk) result, with a notional travel distance in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hit {
    Single,
    Double,
    Triple,
    Homerun,
    Walk,
}

impl Hit {
    /// Notional distance; strictly increasing Single < Double < Triple <
    /// Homerun, with Walk pinned at zero.
    pub fn distance_ft(&self) -> u32 {
        match self {
            Hit::Walk => 0,
            Hit::Single => 120,
            Hit::Double => 250,
            Hit::Triple => 330,
            Hit::Homerun => 410,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hit::Single => "single",
            Hit::Double => "double",
            Hit::Triple => "triple",
            Hit::Homerun => "home run",
            Hit::Walk => "walk",
        }
    }
}

/// Decision points the manager can be prompted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    Steal,
    Bunt,
    IntentionalWalk,
    PinchHit,
    DefensiveShift,
}

/// A pending manager choice, present only while input is awaited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub kind: DecisionKind,
    /// Countdown budget granted when the decision opened
    pub deadline_ms: u32,
    /// The actions the manager may answer with
    pub options: Vec<Action>,
}

/// One-shot override consumed by exactly the next pitch resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchOverride {
    /// Batter squares to bunt: foul / miss / bunt single distribution
    Bunt,
}

/// Every input the reducer understands. The enum is closed: an unrecognized
/// action kind is unrepresentable, which is the fail-fast contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Called or swinging strike
    Strike,
    /// Taken pitch outside the zone
    Ball,
    Foul,
    Hit {
        hit: Hit,
        strategy: Strategy,
    },
    /// Four-ball-free walk (intentional pass)
    Walk,
    // Decision resolutions; the declined forms just clear the prompt.
    Steal {
        send: bool,
    },
    Bunt {
        attempt: bool,
    },
    IntentionalWalk {
        issue: bool,
    },
    PinchHit {
        strategy: Option<Strategy>,
    },
    DefensiveShift {
        shift: bool,
    },
    /// Countdown expiry: neutral default, suppresses the next prompt once
    DecisionTimeout,
    /// Announcer side channel; never touches gameplay fields
    Log(String),
}

impl Action {
    /// True for actions that represent one resolved pitch
    pub fn is_pitch(&self) -> bool {
        matches!(
            self,
            Action::Strike | Action::Ball | Action::Foul | Action::Hit { .. } | Action::Walk
        )
    }

    /// Which decision prompt this action answers, if any
    pub fn decision_kind(&self) -> Option<DecisionKind> {
        match self {
            Action::Steal { .. } => Some(DecisionKind::Steal),
            Action::Bunt { .. } => Some(DecisionKind::Bunt),
            Action::IntentionalWalk { .. } => Some(DecisionKind::IntentionalWalk),
            Action::PinchHit { .. } => Some(DecisionKind::PinchHit),
            Action::DefensiveShift { .. } => Some(DecisionKind::DefensiveShift),
            _ => None,
        }
    }
}

/// A hit or walk that reached base, for the box score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEntry {
    pub inning: u32,
    pub half: TeamSide,
    pub team: String,
    pub batter_slot: usize,
    pub event: Hit,
    pub runs: u32,
}

/// An out (strikeout log and non-strikeout out log share this shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutEntry {
    pub inning: u32,
    pub half: TeamSide,
    pub team: String,
    pub batter_slot: usize,
}

/// One team's setup: identity, batting order, manager strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub lineup: Vec<String>,
    pub strategy: Strategy,
}

impl TeamConfig {
    /// Convenience for demos/tests: numbered batters, balanced strategy
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lineup: (1..=LINEUP_SIZE).map(|n| format!("{name} #{n}")).collect(),
            strategy: Strategy::Balanced,
        }
    }
}

/// Everything needed to start (or re-start) a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    /// Shareable base-36 seed string
    pub seed: String,
    pub away: TeamConfig,
    pub home: TeamConfig,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current inning, starting at 1
    pub inning: u32,
    /// Which team is batting
    pub at_bat: TeamSide,
    /// Balls in the count; 4 never persists (resolved into a walk)
    pub balls: u8,
    /// Strikes in the count; 3 never persists (resolved into a strikeout)
    pub strikes: u8,
    /// Outs this half-inning; 3 never persists (resolved into a side change)
    pub outs: u8,
    /// Occupancy markers for first/second/third
    pub bases: [bool; 3],
    /// Runs, indexed by `TeamSide::idx`
    pub score: [u32; 2],
    pub teams: [String; 2],
    pub lineups: [Vec<String>; 2],
    /// Next batter per team, cycling through each lineup
    pub batter_index: [usize; 2],
    /// Manager strategy per team
    pub strategy: [Strategy; 2],
    /// Present only while a manager choice is awaited
    pub pending_decision: Option<PendingDecision>,
    /// One-shot override consumed by the next pitch resolution
    pub one_pitch_modifier: Option<PitchOverride>,
    /// Skip the next otherwise-eligible decision point once
    pub suppress_next_decision: bool,
    /// Overrides the batting team's strategy until the at-bat/inning ends
    pub pinch_hitter_strategy: Option<Strategy>,
    /// Infield shift against the current batting team
    pub defensive_shift: bool,
    /// The shift prompt is offered at most once per game
    pub defensive_shift_offered: bool,
    /// Increments exactly once per resolved pitch; keys one-shot animations
    pub pitch_key: u64,
    pub game_over: bool,
    pub play_log: Vec<PlayEntry>,
    pub out_log: Vec<OutEntry>,
    pub strikeout_log: Vec<OutEntry>,
}

impl GameState {
    pub fn new(away: &TeamConfig, home: &TeamConfig) -> Self {
        Self {
            inning: 1,
            at_bat: TeamSide::Away,
            balls: 0,
            strikes: 0,
            outs: 0,
            bases: [false; 3],
            score: [0, 0],
            teams: [away.name.clone(), home.name.clone()],
            lineups: [away.lineup.clone(), home.lineup.clone()],
            batter_index: [0, 0],
            strategy: [away.strategy, home.strategy],
            pending_decision: None,
            one_pitch_modifier: None,
            suppress_next_decision: false,
            pinch_hitter_strategy: None,
            defensive_shift: false,
            defensive_shift_offered: false,
            pitch_key: 0,
            game_over: false,
            play_log: Vec::new(),
            out_log: Vec::new(),
            strikeout_log: Vec::new(),
        }
    }

    /// Lineup slot of the current batter
    pub fn batter_slot(&self) -> usize {
        let side = self.at_bat.idx();
        self.batter_index[side] % self.lineups[side].len().max(1)
    }

    /// Display name of the current batter
    pub fn batter_name(&self) -> &str {
        let side = self.at_bat.idx();
        let lineup = &self.lineups[side];
        if lineup.is_empty() {
            &self.teams[side]
        } else {
            &lineup[self.batter_slot()]
        }
    }

    /// Strategy the resolver should consume for the current batter
    pub fn effective_strategy(&self) -> Strategy {
        self.pinch_hitter_strategy
            .unwrap_or(self.strategy[self.at_bat.idx()])
    }

    pub fn batting_team(&self) -> &str {
        &self.teams[self.at_bat.idx()]
    }
}

/// Announcer side channel: ordered free-text lines, never read back by the
/// engine and never part of state comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commentary {
    lines: Vec<String>,
}

impl Commentary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hand accumulated lines to the announcer collaborator
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(
            &TeamConfig::placeholder("Away"),
            &TeamConfig::placeholder("Home"),
        )
    }

    #[test]
    fn test_new_game_opens_top_of_first() {
        let state = fresh();
        assert_eq!(state.inning, 1);
        assert_eq!(state.at_bat, TeamSide::Away);
        assert_eq!((state.balls, state.strikes, state.outs), (0, 0, 0));
        assert_eq!(state.bases, [false; 3]);
        assert_eq!(state.score, [0, 0]);
        assert!(!state.game_over);
    }

    #[test]
    fn test_hit_distances_strictly_ordered() {
        assert_eq!(Hit::Walk.distance_ft(), 0);
        assert!(Hit::Walk.distance_ft() < Hit::Single.distance_ft());
        assert!(Hit::Single.distance_ft() < Hit::Double.distance_ft());
        assert!(Hit::Double.distance_ft() < Hit::Triple.distance_ft());
        assert!(Hit::Triple.distance_ft() < Hit::Homerun.distance_ft());
    }

    #[test]
    fn test_effective_strategy_prefers_pinch_hitter() {
        let mut state = fresh();
        state.strategy = [Strategy::Patient, Strategy::Power];
        assert_eq!(state.effective_strategy(), Strategy::Patient);
        state.pinch_hitter_strategy = Some(Strategy::Contact);
        assert_eq!(state.effective_strategy(), Strategy::Contact);
    }

    #[test]
    fn test_batter_slot_cycles_lineup() {
        let mut state = fresh();
        state.batter_index[0] = 10;
        assert_eq!(state.batter_slot(), 10 % LINEUP_SIZE);
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = fresh();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
