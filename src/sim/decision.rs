//! Manager decision engine
//!
//! Decision prompts open only on a fresh 0-0 count, one candidate per pitch,
//! picked by situational priority. While a prompt is open the pitch clock is
//! suspended and a 10 second countdown (simulated time) runs instead; expiry
//! resolves to a neutral default and suppresses the next otherwise-eligible
//! prompt once.

use crate::consts::DECISION_DEADLINE_MS;
use crate::sim::state::{Action, DecisionKind, GameState, PendingDecision};
use crate::sim::strategy::Strategy;

pub struct DecisionEngine;

impl DecisionEngine {
    /// Open a prompt if the situation calls for one. Returns the kind that
    /// was offered, leaving it in `state.pending_decision` with a full
    /// countdown budget.
    pub fn offer(state: &mut GameState) -> Option<DecisionKind> {
        if state.game_over
            || state.pending_decision.is_some()
            || state.one_pitch_modifier.is_some()
            || state.balls != 0
            || state.strikes != 0
        {
            return None;
        }
        let kind = Self::eligible(state)?;
        if state.suppress_next_decision {
            // One skipped prompt per timeout.
            state.suppress_next_decision = false;
            log::debug!("decision point {kind:?} skipped after timeout");
            return None;
        }
        if kind == DecisionKind::DefensiveShift {
            state.defensive_shift_offered = true;
        }
        state.pending_decision = Some(PendingDecision {
            kind,
            deadline_ms: DECISION_DEADLINE_MS,
            options: Self::options(kind),
        });
        log::debug!("decision point offered: {kind:?}");
        Some(kind)
    }

    /// Highest-priority decision the current situation supports, if any.
    fn eligible(state: &GameState) -> Option<DecisionKind> {
        let [first, second, third] = state.bases;
        if state.outs == 2 && !first && (second || third) {
            return Some(DecisionKind::IntentionalWalk);
        }
        if state.outs == 0 && (first || second) {
            return Some(DecisionKind::Bunt);
        }
        if state.outs < 2 && ((first && !second) || (second && !third)) {
            return Some(DecisionKind::Steal);
        }
        let batting = state.at_bat.idx();
        if state.inning >= 7
            && state.score[batting] <= state.score[state.at_bat.opponent().idx()]
            && state.pinch_hitter_strategy.is_none()
        {
            return Some(DecisionKind::PinchHit);
        }
        if state.inning >= 3 && !state.defensive_shift_offered {
            return Some(DecisionKind::DefensiveShift);
        }
        None
    }

    /// The resolutions a prompt accepts: the acting form(s) first, the
    /// declining form last.
    fn options(kind: DecisionKind) -> Vec<Action> {
        match kind {
            DecisionKind::Steal => vec![Action::Steal { send: true }, Action::Steal { send: false }],
            DecisionKind::Bunt => vec![
                Action::Bunt { attempt: true },
                Action::Bunt { attempt: false },
            ],
            DecisionKind::IntentionalWalk => vec![
                Action::IntentionalWalk { issue: true },
                Action::IntentionalWalk { issue: false },
            ],
            DecisionKind::PinchHit => {
                let mut opts: Vec<Action> = Strategy::ALL
                    .into_iter()
                    .map(|strategy| Action::PinchHit {
                        strategy: Some(strategy),
                    })
                    .collect();
                opts.push(Action::PinchHit { strategy: None });
                opts
            }
            DecisionKind::DefensiveShift => vec![
                Action::DefensiveShift { shift: true },
                Action::DefensiveShift { shift: false },
            ],
        }
    }

    /// Run the countdown by `dt_ms` of simulated time. Returns the timeout
    /// action once the budget is exhausted; the caller dispatches it to the
    /// reducer.
    pub fn tick(state: &mut GameState, dt_ms: u32) -> Option<Action> {
        let pending = state.pending_decision.as_mut()?;
        if dt_ms >= pending.deadline_ms {
            pending.deadline_ms = 0;
            log::debug!("decision countdown expired for {:?}", pending.kind);
            Some(Action::DecisionTimeout)
        } else {
            pending.deadline_ms -= dt_ms;
            None
        }
    }
}
