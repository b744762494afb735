//! Auto-play pacing
//!
//! Simulated-time driver: the embedder calls `advance` with elapsed
//! milliseconds and the scheduler decides when the next pitch goes. All
//! waiting is expressed as cancellable one-shot `Timer` values, so nothing
//! fires after `stop()` and a test can play a whole game in a tight loop.

use crate::consts::{HALF_INNING_HOLD_MS, STRETCH_HOLD_MS};
use crate::settings::GameSpeed;
use crate::sim::session::GameSession;
use crate::sim::state::TeamSide;

/// Cancellable one-shot countdown in simulated milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    remaining_ms: Option<u32>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm the timer; any prior countdown is discarded.
    pub fn start(&mut self, duration_ms: u32) {
        self.remaining_ms = Some(duration_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Advance by `dt_ms`; returns true exactly once, when the countdown
    /// completes. A fired or cancelled timer stays inert until restarted.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        match self.remaining_ms {
            Some(remaining) if dt_ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - dt_ms);
                false
            }
            None => false,
        }
    }
}

/// Drives a session pitch by pitch at the selected speed.
///
/// At most one pitch is dispatched per `advance` call. While a decision
/// prompt is open the pitch timer is cancelled and the decision countdown
/// runs instead. Half-inning changes insert a short hold, with a longer one
/// for the seventh-inning stretch.
#[derive(Debug)]
pub struct AutoPlay {
    interval_ms: u32,
    pitch_timer: Timer,
    hold_timer: Timer,
    running: bool,
}

impl AutoPlay {
    pub fn new(speed: GameSpeed) -> Self {
        let mut pitch_timer = Timer::new();
        pitch_timer.start(speed.pitch_interval_ms());
        Self {
            interval_ms: speed.pitch_interval_ms(),
            pitch_timer,
            hold_timer: Timer::new(),
            running: true,
        }
    }

    /// New interval applies from the next pitch onward.
    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.interval_ms = speed.pitch_interval_ms();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel every timer; no pitch or timeout fires after this.
    pub fn stop(&mut self) {
        self.running = false;
        self.pitch_timer.cancel();
        self.hold_timer.cancel();
    }

    pub fn advance(&mut self, session: &mut GameSession, dt_ms: u32) {
        if !self.running {
            return;
        }
        if session.state().game_over {
            self.stop();
            return;
        }

        if session.state().pending_decision.is_some() {
            // Pitch clock suspends while the manager decides.
            self.pitch_timer.cancel();
            session.tick_decision(dt_ms);
            return;
        }

        if self.hold_timer.is_running() {
            if self.hold_timer.advance(dt_ms) {
                self.pitch_timer.start(self.interval_ms);
            }
            return;
        }

        if !self.pitch_timer.is_running() {
            // Coming out of a decision or a hold: rearm and wait.
            self.pitch_timer.start(self.interval_ms);
            return;
        }

        if self.pitch_timer.advance(dt_ms) {
            let before = (session.state().inning, session.state().at_bat);
            let pitched = session.pitch();
            if session.state().game_over {
                self.stop();
                return;
            }
            if !pitched {
                // A decision prompt opened instead; countdown takes over.
                return;
            }
            let after = (session.state().inning, session.state().at_bat);
            if after != before {
                let hold = if before == (7, TeamSide::Away) {
                    STRETCH_HOLD_MS
                } else {
                    HALF_INNING_HOLD_MS
                };
                self.hold_timer.start(hold);
            } else {
                self.pitch_timer.start(self.interval_ms);
            }
        }
    }
}
