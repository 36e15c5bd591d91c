//! Stack Tower - a block-stacking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (block motion, trimming, stack state)
//! - `config`: Session tuning, validated once at session start
//! - `highscores`: Score collaborator fed by the final score of each run

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, TowerConfig};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Distance from the spawn point to either end of the sweep
    pub const SPAWN_OFFSET: f32 = 10.0;
    /// Horizontal block speed (offset units per second)
    pub const BLOCK_SPEED: f32 = 1.0;
    /// Seconds a freshly spawned block waits before sliding
    pub const NEW_BLOCK_WAIT_TIME: f32 = 1.0;
    /// Edge distance treated as perfectly aligned
    pub const SNAP_TOLERANCE: f32 = 1.0;
    /// Vertical size of every block
    pub const BLOCK_HEIGHT: f32 = 1.0;

    /// Base block footprint (full width along x and z)
    pub const BASE_WIDTH: f32 = 10.0;
    pub const BASE_DEPTH: f32 = 10.0;
}
