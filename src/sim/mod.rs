//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one generator per session
//! - Simulated time only (callers advance timers with dt)
//! - No rendering, audio, or platform dependencies
//!
//! The announcer text stream is a side channel (`Commentary`), produced
//! alongside but never stored inside the authoritative `GameState`.

pub mod decision;
pub mod pitch;
pub mod reduce;
pub mod replay;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod strategy;

pub use decision::DecisionEngine;
pub use pitch::{PitchType, resolve_pitch, select_pitch_type};
pub use reduce::reduce;
pub use replay::{DecisionRecord, ReplayError, ReplayRecord, reconstruct};
pub use rng::GameRng;
pub use scheduler::{AutoPlay, Timer};
pub use session::GameSession;
pub use state::{
    Action, Commentary, DecisionKind, GameSetup, GameState, Hit, OutEntry, PendingDecision,
    PitchOverride, PlayEntry, TeamConfig, TeamSide,
};
pub use strategy::{Stat, Strategy, modifier};
