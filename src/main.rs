//! Terminal demo: auto-plays one full game and prints the announcer feed.
//!
//! Usage: `dugout [seed] [slow|normal|fast]`. The seed is the shareable
//! base-36 string; omit it for a random game. Time is simulated, so the
//! whole game plays out immediately regardless of speed.

use std::process::ExitCode;

use dugout::settings::GameSpeed;
use dugout::sim::replay::reconstruct;
use dugout::sim::{AutoPlay, GameSession, GameSetup, TeamConfig};

const TICK_MS: u32 = 100;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .unwrap_or_else(|| dugout::format_seed(rand::random()));
    let speed = args
        .next()
        .as_deref()
        .and_then(GameSpeed::from_str)
        .unwrap_or_default();

    let setup = GameSetup {
        seed,
        away: TeamConfig::placeholder("Travelers"),
        home: TeamConfig::placeholder("Harbor Cats"),
    };
    let mut session = GameSession::new(&setup);
    let mut auto = AutoPlay::new(speed);

    while !session.state().game_over {
        auto.advance(&mut session, TICK_MS);
        if let Some(pending) = session.state().pending_decision.clone() {
            // Demo manager policy: always take the acting option.
            if let Some(action) = pending.options.first().cloned() {
                session.resolve_decision(action);
            }
        }
        for line in session.drain_commentary() {
            println!("{line}");
        }
    }
    for line in session.drain_commentary() {
        println!("{line}");
    }

    let state = session.state();
    println!();
    println!(
        "{} {} - {} {} ({} innings, {} pitches)",
        state.teams[0], state.score[0], state.teams[1], state.score[1], state.inning, state.pitch_key
    );
    println!(
        "Hits and walks: {}  strikeouts: {}  other outs: {}",
        state.play_log.len(),
        state.strikeout_log.len(),
        state.out_log.len()
    );
    println!("Replay this game with seed {}", session.setup().seed);

    match reconstruct(&session.replay_record()) {
        Ok(rebuilt) if &rebuilt == session.state() => {
            log::info!("replay check: reconstructed state matches");
            ExitCode::SUCCESS
        }
        Ok(_) => {
            log::error!("replay check: reconstructed state diverges");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("replay check failed: {err}");
            ExitCode::FAILURE
        }
    }
}
