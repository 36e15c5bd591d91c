//! The stack and the session it is played in
//!
//! `SessionContext` carries what is fixed for a session (validated tuning,
//! seeded RNG, score collaborator). `StackController` owns the chain of
//! settled blocks and routes the cut signal to the one active block.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::{BlockEntity, BlockId, BlockPhase, Color, SliceOutcome};
use super::events::{GameEvent, SliceIntensity};
use super::rect::Rectangle;
use crate::config::{ConfigError, TowerConfig};

/// Receives the final score when a run ends
pub trait ScoreReporter {
    fn report_final_score(&mut self, score: u32);
}

/// Discards scores
impl ScoreReporter for () {
    fn report_final_score(&mut self, _score: u32) {}
}

/// Everything fixed for one play session
#[derive(Debug)]
pub struct SessionContext<R: ScoreReporter> {
    config: TowerConfig,
    seed: u64,
    rng: Pcg32,
    reporter: R,
}

impl<R: ScoreReporter> SessionContext<R> {
    /// Validate `config` and seed the session RNG
    pub fn new(config: TowerConfig, seed: u64, reporter: R) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("Session starting with seed: {}", seed);
        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            reporter,
        })
    }

    pub fn config(&self) -> &TowerConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

/// Result of delivering a cut signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutOutcome {
    /// No block could take the cut (idle block, or game already over)
    Ignored,
    /// The active block settled and a new block was spawned above it
    Settled { perfect: bool, score: u32 },
    /// The active block missed; the run is over
    GameOver { final_score: u32 },
}

/// Owns the chain of settled blocks and the active block above it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackController {
    /// Settled blocks, base first. A block's id is its index here.
    chain: Vec<BlockEntity>,
    /// Newest block, not yet settled (idle or moving)
    active: Option<BlockEntity>,
    /// Block that missed and ended the run
    fallen: Option<BlockEntity>,
    /// Last trim was perfect
    perfect_streak: bool,
    /// Consecutive perfect trims
    perfect_run: u32,
    game_over: bool,
    /// Pending notifications (not persisted)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl StackController {
    /// Build the base block and spawn the first sliding block on top of it
    pub fn new<R: ScoreReporter>(session: &mut SessionContext<R>) -> Self {
        let base = BlockEntity::base(&session.config, Color::random(&mut session.rng));
        let mut stack = Self {
            chain: vec![base],
            active: None,
            fallen: None,
            perfect_streak: false,
            perfect_run: 0,
            game_over: false,
            events: Vec::new(),
        };
        stack.spawn_next(session);
        stack
    }

    /// Blocks that settled so far, minus the base
    pub fn score(&self) -> u32 {
        (self.chain.len() - 1) as u32
    }

    pub fn chain(&self) -> &[BlockEntity] {
        &self.chain
    }

    /// Top of the settled chain
    pub fn top(&self) -> &BlockEntity {
        // The base block is never removed
        &self.chain[self.chain.len() - 1]
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockEntity> {
        self.chain.get(id.index())
    }

    /// Newest block, whether waiting or sliding
    pub fn pending_block(&self) -> Option<&BlockEntity> {
        self.active.as_ref()
    }

    /// The block currently able to take a cut
    pub fn active_block(&self) -> Option<&BlockEntity> {
        self.active.as_ref().filter(|b| b.is_active())
    }

    /// Footprint the pending block is trimmed against
    pub fn parent_footprint(&self) -> Option<&Rectangle> {
        let parent = self.active.as_ref()?.parent?;
        self.block(parent).map(|b| &b.footprint)
    }

    pub fn fallen_block(&self) -> Option<&BlockEntity> {
        self.fallen.as_ref()
    }

    pub fn perfect_streak(&self) -> bool {
        self.perfect_streak
    }

    pub fn perfect_run(&self) -> u32 {
        self.perfect_run
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the pending block's timers
    pub fn advance(&mut self, dt: f32) {
        if self.game_over {
            return;
        }
        if let Some(block) = self.active.as_mut() {
            block.advance(dt);
        }
    }

    /// Deliver one cut signal.
    ///
    /// Only a moving block reacts; anything else, including every cut after
    /// game over, is ignored and leaves the state untouched.
    pub fn cut<R: ScoreReporter>(&mut self, session: &mut SessionContext<R>) -> CutOutcome {
        if self.game_over {
            log::trace!("cut ignored: game over");
            return CutOutcome::Ignored;
        }
        let Some(block) = self.active.as_mut().filter(|b| b.phase == BlockPhase::Moving) else {
            log::trace!("cut ignored: no moving block");
            return CutOutcome::Ignored;
        };

        let parent_id = block.parent.unwrap_or(BlockId(0));
        let parent = self.chain[parent_id.index()].footprint;

        match block.slice(&parent, session.config.snap_tolerance) {
            SliceOutcome::Fell { .. } => {
                self.game_over = true;
                self.perfect_streak = false;
                self.fallen = self.active.take();

                let final_score = self.score();
                log::info!("Game over with score {}", final_score);
                self.events.push(GameEvent::GameOver { final_score });
                session.reporter.report_final_score(final_score);
                CutOutcome::GameOver { final_score }
            }
            SliceOutcome::Settled { perfect, .. } => {
                self.perfect_streak = perfect;
                if perfect {
                    self.perfect_run += 1;
                    self.events.push(GameEvent::PerfectAlignment);
                } else {
                    self.perfect_run = 0;
                }

                let Some(settled) = self.active.take() else {
                    return CutOutcome::Ignored;
                };
                self.events.push(GameEvent::BlockSettled {
                    position: settled.position(),
                    size: settled.size(),
                    color: settled.color,
                });
                self.chain.push(settled);

                let intensity = if perfect {
                    SliceIntensity::Perfect
                } else {
                    SliceIntensity::Normal
                };
                self.events.push(GameEvent::BlockSliced(intensity));

                let score = self.score();
                self.events.push(GameEvent::ScoreChanged(score));
                self.spawn_next(session);

                CutOutcome::Settled { perfect, score }
            }
        }
    }

    /// Spawn a block above the top of the chain, over the top's footprint
    fn spawn_next<R: ScoreReporter>(&mut self, session: &mut SessionContext<R>) {
        let id = BlockId(self.chain.len() as u32);
        let block = BlockEntity::spawn(id, self.top(), &session.config, &mut session.rng);
        self.events.push(GameEvent::BlockSpawned {
            position: block.position(),
            size: block.size(),
            color: block.color,
        });
        self.active = Some(block);
    }
}
