//! Stack Tower headless runner
//!
//! Plays one session in idle mode at a fixed frame step and logs what the
//! presentation layer would be told.
//!
//! Usage: `stack-tower [config.json] [seed]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use glam::Vec3;
use stack_tower::consts::FRAME_DT;
use stack_tower::sim::{
    Color, Presenter, SessionContext, SliceIntensity, StackController, TickInput, dispatch, tick,
};
use stack_tower::{HighScores, TowerConfig};

/// Stop the demo once the tower is this tall
const MAX_BLOCKS: u32 = 500;

/// Presenter that writes every notification to the log
struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_score_changed(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn on_perfect_alignment(&mut self) {
        log::info!("Perfect!");
    }

    fn on_game_over(&mut self, final_score: u32) {
        log::info!("Game over - final score {}", final_score);
    }

    fn on_block_settled(&mut self, position: Vec3, size: Vec3, color: Color) {
        log::debug!(
            "Settled at {:?} size {:?} color #{:06x}",
            position,
            size,
            color.to_rgb_u32()
        );
    }

    fn on_block_sliced(&mut self, intensity: SliceIntensity) {
        match intensity {
            SliceIntensity::Perfect => log::debug!("Camera rise"),
            SliceIntensity::Normal => log::debug!("Camera shake + boom"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Stack Tower (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            TowerConfig::from_json(&json).with_context(|| format!("loading config {path}"))?
        }
        None => TowerConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s}"))?,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    let mut session = SessionContext::new(config, seed, HighScores::new())?;
    let mut stack = StackController::new(&mut session);
    let mut presenter = LogPresenter;
    let input = TickInput {
        cut: false,
        idle_mode: true,
    };

    while !stack.is_game_over() && stack.score() < MAX_BLOCKS {
        tick(&mut stack, &mut session, &input, FRAME_DT);
        dispatch(stack.drain_events(), &mut presenter);
    }

    if let Some(block) = stack.fallen_block() {
        log::debug!("Block {} fell at {:?}", block.id.0, block.position());
    }

    let scores = session.reporter();
    println!(
        "Seed {}: stacked {} blocks (best {}, final perfect run {})",
        session.seed(),
        stack.score(),
        scores.best,
        stack.perfect_run()
    );
    Ok(())
}
