//! Pellet Pursuit Demo
//!
//! Runs a scripted round on a walled arena, reports the outcome, and
//! verifies that replaying the recorded intents reproduces the final
//! state hash.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pellet_pursuit::{
    game::events::GameEventData,
    Cell, Direction, RunnerId, Session, SessionConfig, VERSION,
};

/// Demo cap; the round usually ends in a capture well before this.
const MAX_DEMO_TICKS: u32 = 600;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Pellet Pursuit Engine v{}", VERSION);

    demo_round()
}

/// Patrol script: every runner walks a slow box, offset by `phase`.
fn scripted_direction(tick: u32, phase: u32) -> Direction {
    match ((tick / 12) + phase) % 4 {
        0 => Direction::Right,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Up,
    }
}

/// Two horizontal barriers with wide gaps at both ends.
fn build_arena(session: &mut Session) -> Result<()> {
    for x in 5..15 {
        session.set_wall(Cell::new(x, 5))?;
        session.set_wall(Cell::new(x, 14))?;
    }
    let pellets = session.fill_pellets()?;
    info!("Arena ready: {} pellets placed", pellets);
    Ok(())
}

/// Demo function to exercise a full round.
fn demo_round() -> Result<()> {
    info!("=== Starting Demo Round ===");

    let mut session = Session::new(SessionConfig::default())?;
    info!("Round ID: {}", session.round_id);

    build_arena(&mut session)?;

    session.add_runner(RunnerId(1), Cell::new(1, 1), 0.5)?;
    session.add_runner(RunnerId(2), Cell::new(18, 18), 0.5)?;
    session.add_hunter(Cell::new(9, 9), 0.25)?;
    session.add_hunter(Cell::new(10, 10), 0.25)?;
    info!("2 runners vs 2 hunters on a 20x20 grid");

    let mut total_events = 0;
    for t in 0..MAX_DEMO_TICKS {
        session.set_intent(RunnerId(1), scripted_direction(t, 0))?;
        session.set_intent(RunnerId(2), scripted_direction(t, 2))?;

        let result = session.advance()?;
        total_events += result.events.len();

        // Log important events
        for event in &result.events {
            match &event.data {
                GameEventData::RunnerCaptured {
                    runner_id,
                    hunter_id,
                } => {
                    info!(
                        "Runner {} captured by hunter {} at tick {}",
                        runner_id.0, hunter_id.0, event.tick
                    );
                }
                GameEventData::RoundEnded { duration_ticks, .. } => {
                    info!("Round ended after {} ticks", duration_ticks);
                }
                GameEventData::PelletCollected { .. } => {}
            }
        }

        // Report every 100 ticks
        if t > 0 && t % 100 == 0 {
            let state = session.state();
            info!(
                "Tick {}: {} pellets left, {} events so far",
                state.tick,
                state.grid.pellets_remaining(),
                total_events
            );
        }

        if session.is_ended() {
            break;
        }
    }

    // Print final results
    info!("=== Round Results ===");
    let summary = session.summary();
    info!("Final State Hash: {}", summary.final_state_hash);
    for runner in &summary.runners {
        info!(
            "#{}: Runner {} - Score: {} ({} pellets)",
            runner.place, runner.runner_id.0, runner.score, runner.pellets_collected
        );
    }
    info!("Total events: {}", total_events);
    info!("Summary: {}", serde_json::to_string_pretty(&summary)?);

    // Verify determinism by replaying the recorded intents
    info!("=== Verifying Determinism ===");
    let outcome = session.verify_replay()?;
    info!("Live State Hash:   {}", hex::encode(outcome.live_hash));
    info!("Replay State Hash: {}", hex::encode(outcome.replayed_hash));

    if outcome.verified() {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        info!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
