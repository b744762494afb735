//! The game state reducer
//!
//! Single entry point that applies one resolved action to the game state:
//! count/base/out/inning/score transitions, structured log emission, and the
//! gameplay effects of manager decisions. Invariants held between calls:
//! `balls < 4`, `strikes < 3`, `outs < 3` (the fourth ball, third strike, and
//! third out are resolved within the same step that produced them), score and
//! inning never decrease, and a finished game is frozen.

use crate::consts::*;
use crate::sim::rng::GameRng;
use crate::sim::state::{
    Action, Commentary, DecisionKind, GameState, Hit, OutEntry, PitchOverride, PlayEntry, TeamSide,
};
use crate::sim::strategy::{Stat, modifier};

/// Apply `action` to `state`. Announcer lines go to `voice`; `rng` is only
/// consumed by actions that roll (steal attempts).
pub fn reduce(state: &mut GameState, action: &Action, rng: &mut GameRng, voice: &mut Commentary) {
    if let Action::Log(line) = action {
        // Pure side channel: no gameplay field may change.
        voice.push(line.clone());
        return;
    }

    if state.game_over {
        log::debug!("action after game over ignored: {action:?}");
        return;
    }

    let is_pitch = action.is_pitch();

    match action {
        Action::Strike => apply_strike(state, voice),
        Action::Foul => apply_foul(state, voice),
        Action::Ball => apply_ball(state, voice),
        Action::Hit { hit, .. } => apply_hit(state, *hit, voice),
        Action::Walk => {
            voice.push(format!("{} is awarded first base.", state.batter_name()));
            award_walk(state, voice);
        }
        Action::Steal { send } => {
            if take_decision(state, DecisionKind::Steal, action) && *send {
                attempt_steal(state, rng, voice);
            }
        }
        Action::Bunt { attempt } => {
            if take_decision(state, DecisionKind::Bunt, action) && *attempt {
                state.one_pitch_modifier = Some(PitchOverride::Bunt);
                voice.push(format!("{} squares around to bunt...", state.batter_name()));
            }
        }
        Action::IntentionalWalk { issue } => {
            if take_decision(state, DecisionKind::IntentionalWalk, action) && *issue {
                voice.push(format!(
                    "Four wide ones: {} takes the free pass.",
                    state.batter_name()
                ));
                award_walk(state, voice);
            }
        }
        Action::PinchHit { strategy } => {
            if take_decision(state, DecisionKind::PinchHit, action) {
                if let Some(strategy) = strategy {
                    state.pinch_hitter_strategy = Some(*strategy);
                    voice.push(format!(
                        "A new bat steps in for {}, looking {}.",
                        state.batting_team(),
                        strategy.as_str()
                    ));
                }
            }
        }
        Action::DefensiveShift { shift } => {
            if take_decision(state, DecisionKind::DefensiveShift, action) && *shift {
                state.defensive_shift = true;
                voice.push("The infield rotates into a shift.".to_string());
            }
        }
        Action::DecisionTimeout => {
            if state.pending_decision.take().is_some() {
                // Neutral default; don't re-prompt on the very next chance.
                state.suppress_next_decision = true;
                voice.push("No call from the dugout; play on.".to_string());
            } else {
                log::debug!("decision timeout with nothing pending");
            }
        }
        Action::Log(_) => unreachable!("handled above"),
    }

    if is_pitch {
        state.pitch_key += 1;
        // One-shot: consumed by this pitch whether or not it changed anything.
        state.one_pitch_modifier = None;
    }
}

/// Clear the matching prompt; a resolution that arrives late or for the wrong
/// prompt is dropped as a no-op.
fn take_decision(state: &mut GameState, kind: DecisionKind, action: &Action) -> bool {
    let answers = match state.pending_decision.as_ref().map(|p| p.kind) {
        Some(pending) if pending == kind => true,
        Some(pending) => {
            log::debug!("decision {action:?} does not answer pending {pending:?}");
            false
        }
        None => {
            log::debug!("late decision resolution dropped: {action:?}");
            false
        }
    };
    if answers {
        state.pending_decision = None;
    }
    answers
}

fn apply_strike(state: &mut GameState, voice: &mut Commentary) {
    state.strikes += 1;
    if state.strikes < 3 {
        voice.push(format!(
            "Strike {} on {}.",
            state.strikes,
            state.batter_name()
        ));
        return;
    }
    // Strike three: resolved within this step, never stored.
    voice.push(format!("Strike three! {} is out.", state.batter_name()));
    state.strikeout_log.push(OutEntry {
        inning: state.inning,
        half: state.at_bat,
        team: state.batting_team().to_string(),
        batter_slot: state.batter_slot(),
    });
    reset_count(state);
    advance_batter(state);
    record_out(state, voice);
}

fn apply_foul(state: &mut GameState, voice: &mut Commentary) {
    // A foul never produces the third strike.
    if state.strikes < 2 {
        state.strikes += 1;
    }
    voice.push(format!("{} fouls it off.", state.batter_name()));
}

fn apply_ball(state: &mut GameState, voice: &mut Commentary) {
    state.balls += 1;
    if state.balls < 4 {
        voice.push(format!("Ball {}.", state.balls));
        return;
    }
    // Ball four: resolved within this step, never stored.
    voice.push(format!("Ball four, {} walks.", state.batter_name()));
    award_walk(state, voice);
}

/// Batter to first with forced advancement only; logs the walk and scores
/// any forced-in run. Shared by ball four and the intentional pass.
fn award_walk(state: &mut GameState, voice: &mut Commentary) {
    let runs = forced_advance(&mut state.bases);
    state.play_log.push(PlayEntry {
        inning: state.inning,
        half: state.at_bat,
        team: state.batting_team().to_string(),
        batter_slot: state.batter_slot(),
        event: Hit::Walk,
        runs,
    });
    score_runs(state, runs, voice);
    reset_count(state);
    advance_batter(state);
}

/// Runners move up only if forced by the batter taking first. Returns runs in.
fn forced_advance(bases: &mut [bool; 3]) -> u32 {
    let mut runs = 0;
    if bases[0] && bases[1] && bases[2] {
        runs = 1;
    } else if bases[0] && bases[1] {
        bases[2] = true;
    } else if bases[0] {
        bases[1] = true;
    }
    bases[0] = true;
    runs
}

fn apply_hit(state: &mut GameState, hit: Hit, voice: &mut Commentary) {
    let runs = advance_on_hit(&mut state.bases, hit);
    voice.push(match hit {
        Hit::Homerun => format!("{} crushes a home run!", state.batter_name()),
        _ => format!("{} lines a {}.", state.batter_name(), hit.as_str()),
    });
    if runs > 0 {
        voice.push(format!("{runs} run(s) come in to score."));
    }
    state.play_log.push(PlayEntry {
        inning: state.inning,
        half: state.at_bat,
        team: state.batting_team().to_string(),
        batter_slot: state.batter_slot(),
        event: hit,
        runs,
    });
    score_runs(state, runs, voice);
    reset_count(state);
    advance_batter(state);
}

/// Base advancement by hit type. Returns runs scored (including the batter
/// on a home run).
fn advance_on_hit(bases: &mut [bool; 3], hit: Hit) -> u32 {
    let occupied = bases.iter().filter(|b| **b).count() as u32;
    match hit {
        Hit::Single => {
            // Runner on third scores, everyone else moves up one.
            let runs = bases[2] as u32;
            bases[2] = bases[1];
            bases[1] = bases[0];
            bases[0] = true;
            runs
        }
        Hit::Double => {
            let runs = bases[2] as u32 + bases[1] as u32;
            bases[2] = bases[0];
            bases[1] = true;
            bases[0] = false;
            runs
        }
        Hit::Triple => {
            *bases = [false, false, true];
            occupied
        }
        Hit::Homerun => {
            *bases = [false, false, false];
            occupied + 1
        }
        Hit::Walk => forced_advance(bases),
    }
}

/// Credit runs to the batting team and evaluate the walk-off rule: a
/// go-ahead run by the home team in the bottom of inning 9+ ends the game
/// immediately, without waiting for the third out.
fn score_runs(state: &mut GameState, runs: u32, voice: &mut Commentary) {
    if runs == 0 {
        return;
    }
    state.score[state.at_bat.idx()] += runs;
    if state.at_bat == TeamSide::Home
        && state.inning >= REGULATION_INNINGS
        && state.score[1] > state.score[0]
    {
        state.game_over = true;
        voice.push(format!(
            "That's a walk-off! {} win it {}-{}.",
            state.teams[1], state.score[1], state.score[0]
        ));
        log::info!("walk-off: {} {}-{}", state.teams[1], state.score[1], state.score[0]);
    }
}

fn reset_count(state: &mut GameState) {
    state.balls = 0;
    state.strikes = 0;
}

fn advance_batter(state: &mut GameState) {
    state.batter_index[state.at_bat.idx()] += 1;
    // A pinch hitter's bias lasts for that batter only.
    state.pinch_hitter_strategy = None;
}

/// One more out; the third out ends the half-inning within the same step.
fn record_out(state: &mut GameState, voice: &mut Commentary) {
    state.outs += 1;
    if state.outs >= 3 {
        end_half_inning(state, voice);
    } else {
        voice.push(format!("{} down.", state.outs));
    }
}

/// Side change: counts and bases clear; the inning advances only when the
/// bottom half ends. Regulation endings are evaluated here.
fn end_half_inning(state: &mut GameState, voice: &mut Commentary) {
    voice.push(format!(
        "That retires the side in the {} of inning {}.",
        state.at_bat.half_name(),
        state.inning
    ));
    reset_count(state);
    state.bases = [false; 3];
    state.outs = 0;
    state.pinch_hitter_strategy = None;
    state.defensive_shift = false;

    match state.at_bat {
        TeamSide::Away => {
            if state.inning >= REGULATION_INNINGS && state.score[1] > state.score[0] {
                // Home already leads; the bottom half is not needed.
                finish_game(state, voice);
            } else {
                state.at_bat = TeamSide::Home;
            }
        }
        TeamSide::Home => {
            if state.inning >= REGULATION_INNINGS && state.score[0] != state.score[1] {
                finish_game(state, voice);
            } else {
                state.at_bat = TeamSide::Away;
                state.inning += 1;
            }
        }
    }
}

fn finish_game(state: &mut GameState, voice: &mut Commentary) {
    state.game_over = true;
    let winner = if state.score[1] > state.score[0] { 1 } else { 0 };
    voice.push(format!(
        "Final: {} {}, {} {}.",
        state.teams[winner],
        state.score[winner],
        state.teams[1 - winner],
        state.score[1 - winner]
    ));
    log::info!(
        "game over after {} innings: {:?}",
        state.inning,
        state.score
    );
}

/// Resolve a green-lit steal. The lead runner with an open base ahead goes;
/// success scales with the batting team's steal modifier.
fn attempt_steal(state: &mut GameState, rng: &mut GameRng, voice: &mut Commentary) {
    let from = if state.bases[1] && !state.bases[2] {
        1
    } else if state.bases[0] && !state.bases[1] {
        0
    } else {
        log::debug!("steal resolved with no eligible runner");
        return;
    };
    let strategy = state.effective_strategy();
    let success_per_mille = (STEAL_SUCCESS_RATE * 1000.0 * modifier(strategy, Stat::Steal))
        .clamp(10.0, 990.0) as u32;
    state.bases[from] = false;
    if rng.roll(1000) < success_per_mille {
        state.bases[from + 1] = true;
        voice.push(format!("The runner swipes base {}!", from + 2));
    } else {
        voice.push("Thrown out stealing!".to_string());
        state.out_log.push(OutEntry {
            inning: state.inning,
            half: state.at_bat,
            team: state.batting_team().to_string(),
            batter_slot: state.batter_slot(),
        });
        record_out(state, voice);
    }
}
