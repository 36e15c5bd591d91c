//! Session tuning
//!
//! Supplied once when a session starts and immutable afterwards. Every scalar
//! is checked up front so the simulation never has to guard against a zero
//! speed or a negative wait mid-run.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("block speed must be positive (got {0})")]
    NonPositiveSpeed(f32),
    #[error("new block wait time must be positive (got {0})")]
    NonPositiveWaitTime(f32),
    #[error("spawn offset must be positive (got {0})")]
    NonPositiveSpawnOffset(f32),
    #[error("snap tolerance cannot be negative (got {0})")]
    NegativeSnapTolerance(f32),
    #[error("block height must be positive (got {0})")]
    NonPositiveBlockHeight(f32),
    #[error("base footprint must have positive width and depth (got {0}x{1})")]
    InvalidBaseSize(f32, f32),
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Distance from the spawn point to each end of the sweep
    pub spawn_offset: f32,
    /// Horizontal speed of the sliding block
    pub block_speed: f32,
    /// Delay between a block spawning and it starting to slide
    pub new_block_wait_time: f32,
    /// Max edge distance that snaps to the parent's edge
    pub snap_tolerance: f32,
    /// Height of every block
    pub block_height: f32,
    /// Base block center in the horizontal plane (`y` holds world z)
    pub base_center: Vec2,
    /// Base block full width (x) and depth (z)
    pub base_size: Vec2,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            spawn_offset: SPAWN_OFFSET,
            block_speed: BLOCK_SPEED,
            new_block_wait_time: NEW_BLOCK_WAIT_TIME,
            snap_tolerance: SNAP_TOLERANCE,
            block_height: BLOCK_HEIGHT,
            base_center: Vec2::ZERO,
            base_size: Vec2::new(BASE_WIDTH, BASE_DEPTH),
        }
    }
}

impl TowerConfig {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("spawn_offset", self.spawn_offset),
            ("block_speed", self.block_speed),
            ("new_block_wait_time", self.new_block_wait_time),
            ("snap_tolerance", self.snap_tolerance),
            ("block_height", self.block_height),
            ("base_center.x", self.base_center.x),
            ("base_center.z", self.base_center.y),
            ("base_size.x", self.base_size.x),
            ("base_size.z", self.base_size.y),
        ];
        if let Some(&(name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(name));
        }

        if self.block_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.block_speed));
        }
        if self.new_block_wait_time <= 0.0 {
            return Err(ConfigError::NonPositiveWaitTime(self.new_block_wait_time));
        }
        if self.spawn_offset <= 0.0 {
            return Err(ConfigError::NonPositiveSpawnOffset(self.spawn_offset));
        }
        if self.snap_tolerance < 0.0 {
            return Err(ConfigError::NegativeSnapTolerance(self.snap_tolerance));
        }
        if self.block_height <= 0.0 {
            return Err(ConfigError::NonPositiveBlockHeight(self.block_height));
        }
        if self.base_size.x <= 0.0 || self.base_size.y <= 0.0 {
            return Err(ConfigError::InvalidBaseSize(self.base_size.x, self.base_size.y));
        }
        Ok(())
    }

    /// Seconds a block takes to travel from its start to its end position
    #[inline]
    pub fn sweep_duration(&self) -> f32 {
        self.spawn_offset / self.block_speed
    }
}
