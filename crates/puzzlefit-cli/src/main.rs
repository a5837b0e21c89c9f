//! Headless demo runner. Builds a small board, hands the input to a
//! scripted solver and logs the sounds and host commands the session
//! emits, which is everything a rendering host would see.

mod bot;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use puzzlefit_core::{
    FixedTimestep, GameSession, InputQueue, Piece, PieceId, Pose, PuzzleConfig, SessionPhase,
};

use crate::bot::SolverBot;

#[derive(Parser, Debug)]
#[command(name = "puzzlefit")]
#[command(about = "Play a puzzle session headlessly and log what the host would see")]
struct Args {
    /// Seed for the scatter randomizer.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of demo pieces on the board.
    #[arg(long, default_value_t = 8)]
    pieces: u32,
    /// JSON config file, built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Logic steps per second. Coarse steps keep the snap pull decisive.
    #[arg(long, default_value_t = 10)]
    fps: u32,
    /// Abort the run after this many logic steps.
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PuzzleConfig::from_json(&fs::read_to_string(path)?)?,
        None => PuzzleConfig::default(),
    };

    let mut session = GameSession::new(config.clone(), demo_board(args.pieces), args.seed);
    let mut bot = SolverBot::new(config);
    let mut queue = InputQueue::new();
    let mut timestep = FixedTimestep::new(1.0 / args.fps.max(1) as f32);
    let dt = timestep.dt();

    // Feed the fixed timestep the way a 60 fps host would.
    let frame_dt = 1.0 / 60.0;
    let mut ticks: u64 = 0;
    'run: loop {
        for _ in 0..timestep.accumulate(frame_dt) {
            bot.drive(&session, &mut queue);
            session.tick(dt, &mut queue);
            report(&mut session);
            ticks += 1;
            if let SessionPhase::Ended(outcome) = session.phase() {
                log::info!(
                    "run over: {:?} with {}/{} pieces locked after {:.1}s game time, {} steps",
                    outcome,
                    session.snapped_count(),
                    session.total_pieces(),
                    session.elapsed(),
                    ticks
                );
                break 'run;
            }
            if ticks >= args.max_ticks {
                log::warn!("giving up after {} steps", ticks);
                break 'run;
            }
        }
    }
    Ok(())
}

/// A flat grid of targets, four columns per row, on the snap grid.
fn demo_board(count: u32) -> Vec<Piece> {
    (0..count)
        .map(|i| {
            let col = (i % 4) as f32;
            let row = (i / 4) as f32;
            Piece::new(PieceId(i))
                .with_name(format!("piece-{i}"))
                .with_target(Pose::from_position(Vec3::new(col - 1.5, row - 0.5, 0.0)))
                .with_bounds_radius(0.4)
        })
        .collect()
}

/// Forward the session's outgoing queues to the log.
fn report(session: &mut GameSession) {
    for sound in session.drain_sounds() {
        log::info!("sound cue: {:?}", sound);
    }
    for command in session.drain_commands() {
        log::debug!("host command: {:?}", command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_board_targets_sit_on_the_grid() {
        let board = demo_board(8);
        assert_eq!(board.len(), 8);
        for piece in &board {
            let p = piece.target.position;
            // Two-decimal grid, so a quantized pose can land exactly.
            assert_eq!(p, piece.target.quantized().position);
            assert!(p.x.abs() <= 1.5 && p.y.abs() <= 0.5);
        }
    }
}
