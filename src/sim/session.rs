//! Game session aggregate
//!
//! Owns the authoritative `GameState`, the one seeded generator, and the
//! announcer side channel. Observers only ever see `&GameState` or serialized
//! snapshots; every mutation goes through the reducer. The session also keeps
//! the decision record that, together with the seed, lets `replay` rebuild
//! the game byte for byte.

use crate::sim::decision::DecisionEngine;
use crate::sim::pitch::resolve_pitch;
use crate::sim::reduce::reduce;
use crate::sim::replay::{self, DecisionRecord, ReplayError, ReplayRecord};
use crate::sim::rng::GameRng;
use crate::sim::state::{Action, Commentary, GameSetup, GameState};
use crate::{format_seed, parse_seed};

pub struct GameSession {
    setup: GameSetup,
    seed: u32,
    state: GameState,
    rng: GameRng,
    voice: Commentary,
    decisions: Vec<DecisionRecord>,
    /// Pitch key a prompt was last offered at; one prompt per pitch.
    last_offer_key: Option<u64>,
}

impl GameSession {
    /// Start a game. An unparseable seed string is recoverable: a random
    /// seed is substituted and the effective setup records it, so the replay
    /// record stays reconstructible.
    pub fn new(setup: &GameSetup) -> Self {
        let seed = match parse_seed(&setup.seed) {
            Some(seed) => seed,
            None => {
                let fallback: u32 = rand::random();
                log::warn!(
                    "invalid seed {:?}; substituting {}",
                    setup.seed,
                    format_seed(fallback)
                );
                fallback
            }
        };
        let setup = GameSetup {
            seed: format_seed(seed),
            away: setup.away.clone(),
            home: setup.home.clone(),
        };
        let mut voice = Commentary::new();
        voice.push(format!(
            "{} at {}. Seed {} for the scorekeepers. Play ball!",
            setup.away.name, setup.home.name, setup.seed
        ));
        log::info!("session start: seed={} ({seed})", setup.seed);
        Self {
            state: GameState::new(&setup.away, &setup.home),
            setup,
            seed,
            rng: GameRng::new(seed),
            voice,
            decisions: Vec::new(),
            last_offer_key: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Numeric seed actually driving the generator
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// Throw the next pitch, unless a decision point intervenes.
    ///
    /// Returns true when a pitch was resolved; false when the game is over,
    /// a prompt is already open, or a new prompt just opened (each pitch key
    /// gets at most one prompt, so a declined decision does not re-prompt).
    pub fn pitch(&mut self) -> bool {
        if self.state.game_over || self.state.pending_decision.is_some() {
            return false;
        }
        if self.last_offer_key != Some(self.state.pitch_key) {
            if let Some(kind) = DecisionEngine::offer(&mut self.state) {
                self.last_offer_key = Some(self.state.pitch_key);
                self.voice.push(format!("The dugout signals: {kind:?}?"));
                return false;
            }
        }
        let action = resolve_pitch(&self.state, &mut self.rng);
        reduce(&mut self.state, &action, &mut self.rng, &mut self.voice);
        true
    }

    /// Answer the open prompt. A resolution that does not match the open
    /// prompt (or arrives with none open) is dropped and not recorded.
    pub fn resolve_decision(&mut self, action: Action) -> bool {
        let answers = match (&self.state.pending_decision, action.decision_kind()) {
            (Some(pending), Some(kind)) => pending.kind == kind,
            _ => false,
        };
        if !answers {
            log::debug!("dropping decision resolution {action:?}");
            return false;
        }
        self.decisions.push(DecisionRecord {
            pitch_key: self.state.pitch_key,
            action: action.clone(),
        });
        reduce(&mut self.state, &action, &mut self.rng, &mut self.voice);
        true
    }

    /// Advance the decision countdown by simulated time; expiry resolves
    /// the prompt to its neutral default and is recorded like any answer.
    pub fn tick_decision(&mut self, dt_ms: u32) {
        if let Some(action) = DecisionEngine::tick(&mut self.state, dt_ms) {
            self.decisions.push(DecisionRecord {
                pitch_key: self.state.pitch_key,
                action: action.clone(),
            });
            reduce(&mut self.state, &action, &mut self.rng, &mut self.voice);
        }
    }

    /// Append a free-text announcer line through the reducer's side channel.
    pub fn log(&mut self, line: impl Into<String>) {
        let action = Action::Log(line.into());
        reduce(&mut self.state, &action, &mut self.rng, &mut self.voice);
    }

    /// Take all accumulated announcer lines.
    pub fn drain_commentary(&mut self) -> Vec<String> {
        self.voice.drain()
    }

    /// Everything needed to rebuild this game up to this exact moment.
    pub fn replay_record(&self) -> ReplayRecord {
        ReplayRecord {
            setup: self.setup.clone(),
            decisions: self.decisions.clone(),
            pitches_played: self.state.pitch_key,
            pending_deadline_ms: self
                .state
                .pending_decision
                .as_ref()
                .map(|pending| pending.deadline_ms),
        }
    }

    /// Restore a saved session to its save point and make it playable again.
    ///
    /// The rebuilt state, generator position, and decision history are the
    /// live session's, so continuing produces the same game the original
    /// would have.
    pub fn resume(record: &ReplayRecord) -> Result<Self, ReplayError> {
        let (state, rng) = replay::rebuild(record)?;
        let seed = rng.seed();
        // A prompt open (or already answered) at the current pitch key must
        // not be offered a second time.
        let last_offer_key = if state.pending_decision.is_some() {
            Some(state.pitch_key)
        } else {
            record
                .decisions
                .last()
                .filter(|rec| rec.pitch_key == state.pitch_key)
                .map(|rec| rec.pitch_key)
        };
        let mut voice = Commentary::new();
        voice.push(format!(
            "Back to the action in the {} of inning {}.",
            state.at_bat.half_name(),
            state.inning
        ));
        log::info!(
            "session resumed: seed={} pitch={} decisions={}",
            record.setup.seed,
            state.pitch_key,
            record.decisions.len()
        );
        Ok(Self {
            setup: record.setup.clone(),
            seed,
            state,
            rng,
            voice,
            decisions: record.decisions.clone(),
            last_offer_key,
        })
    }
}
