//! A single block: footprint, sweep motion and the cut state machine
//!
//! `Idle -> Moving -> Slicing -> Settled | GameOver`. A block only ever
//! changes its own state; creating the next block and touching the stack is
//! left to the [`StackController`](super::StackController).

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::{Rectangle, TrimResult, trim};
use crate::config::TowerConfig;

/// Position of a block in the stack (0 = base)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl BlockId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockPhase {
    /// Spawned, waiting before it starts to slide
    Idle,
    /// Sliding from start to end (or holding at end)
    Moving,
    /// Cut accepted, trim in progress
    Slicing,
    /// Trimmed and resting on its parent
    Settled,
    /// Missed its parent entirely
    GameOver,
}

/// Horizontal axis a block slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Unit vector in the x/z plane
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Z => Vec2::Y,
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }
}

/// Linear RGB color, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Uniform in RGB space
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(0.0..=1.0),
            g: rng.random_range(0.0..=1.0),
            b: rng.random_range(0.0..=1.0),
        }
    }

    /// Packed 0xRRGGBB
    pub fn to_rgb_u32(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// One-way sweep along `axis`, from offset `start` to offset `end`.
///
/// Offsets are measured from `origin`, the footprint the block spawned over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub axis: Axis,
    /// +1.0 or -1.0: side of the spawn point the sweep starts on
    pub direction: f32,
    pub origin: Rectangle,
    pub start: f32,
    pub end: f32,
    /// Seconds to wait in `Idle` before sliding
    pub wait: f32,
    /// Seconds the sweep lasts
    pub duration: f32,
    /// Time spent waiting so far
    pub waited: f32,
    /// Time spent sliding so far
    pub elapsed: f32,
}

impl Motion {
    /// Progress along the sweep in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Sweep reached `end` and is holding there
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current offset from the origin along the axis
    pub fn offset(&self) -> f32 {
        if self.finished() {
            self.end
        } else {
            self.start + (self.end - self.start) * self.progress()
        }
    }

    /// Footprint at the current offset
    pub fn footprint(&self) -> Rectangle {
        self.origin.translated(self.axis.unit() * self.offset())
    }
}

/// How a cut resolved for the block that received it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceOutcome {
    /// Block rests on its parent; the next block goes on top of it
    Settled { perfect: bool, trim: TrimResult },
    /// Block missed its parent
    Fell { trim: TrimResult },
}

/// A block in (or falling off) the stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntity {
    pub id: BlockId,
    /// Block this one is trimmed against; `None` for the base
    pub parent: Option<BlockId>,
    pub footprint: Rectangle,
    /// World y of the block's center
    pub y: f32,
    pub height: f32,
    pub color: Color,
    /// Sweep state; the base block never moves
    pub motion: Option<Motion>,
    pub phase: BlockPhase,
}

impl BlockEntity {
    /// The settled block at the bottom of the stack
    pub fn base(config: &TowerConfig, color: Color) -> Self {
        Self {
            id: BlockId(0),
            parent: None,
            footprint: Rectangle::new(config.base_center, config.base_size * 0.5),
            y: 0.0,
            height: config.block_height,
            color,
            motion: None,
            phase: BlockPhase::Settled,
        }
    }

    /// Spawn a block above `parent`, matching its footprint.
    ///
    /// The block is placed at the start of its sweep, offset along a random
    /// axis on a random side.
    pub fn spawn<R: Rng + ?Sized>(
        id: BlockId,
        parent: &BlockEntity,
        config: &TowerConfig,
        rng: &mut R,
    ) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let axis = if rng.random_bool(0.5) { Axis::X } else { Axis::Z };
        let color = Color::random(rng);

        let motion = Motion {
            axis,
            direction,
            origin: parent.footprint,
            start: config.spawn_offset * direction,
            end: -config.spawn_offset * direction,
            wait: config.new_block_wait_time,
            duration: config.sweep_duration(),
            waited: 0.0,
            elapsed: 0.0,
        };

        Self {
            id,
            parent: Some(parent.id),
            footprint: motion.footprint(),
            y: parent.y + parent.height,
            height: config.block_height,
            color,
            motion: Some(motion),
            phase: BlockPhase::Idle,
        }
    }

    /// World-space center
    pub fn position(&self) -> Vec3 {
        let c = self.footprint.center();
        Vec3::new(c.x, self.y, c.y)
    }

    /// World-space full size
    pub fn size(&self) -> Vec3 {
        let s = self.footprint.size();
        Vec3::new(s.x, self.height, s.y)
    }

    /// Block that can take a cut right now
    pub fn is_active(&self) -> bool {
        matches!(self.phase, BlockPhase::Moving | BlockPhase::Slicing)
    }

    /// Advance wait/sweep timers by `dt` seconds.
    ///
    /// Time left over when the wait finishes carries into the sweep.
    pub fn advance(&mut self, dt: f32) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };

        let mut dt = dt;
        if self.phase == BlockPhase::Idle {
            motion.waited += dt;
            if motion.waited < motion.wait {
                return;
            }
            dt = motion.waited - motion.wait;
            self.phase = BlockPhase::Moving;
            log::trace!("block {} started moving along {:?}", self.id.0, motion.axis);
        }

        if self.phase == BlockPhase::Moving && !motion.finished() {
            motion.elapsed += dt;
            self.footprint = motion.footprint();
        }
    }

    /// Stop sliding and trim against the parent's footprint.
    ///
    /// The block is frozen where it currently is before the trim runs. On a
    /// perfect trim the footprint becomes the parent's exactly rather than the
    /// clamped rectangle.
    pub fn slice(&mut self, parent: &Rectangle, tolerance: f32) -> SliceOutcome {
        debug_assert_eq!(self.phase, BlockPhase::Moving, "slice on inactive block");
        self.phase = BlockPhase::Slicing;

        let trim = trim(&self.footprint, parent, tolerance);
        if !trim.is_overlap() {
            self.phase = BlockPhase::GameOver;
            log::debug!("block {} missed its parent", self.id.0);
            return SliceOutcome::Fell { trim };
        }

        let perfect = trim.is_perfect();
        self.footprint = if perfect { *parent } else { trim.trimmed };
        self.phase = BlockPhase::Settled;
        log::debug!(
            "block {} settled at {:?} size {:?} (perfect: {})",
            self.id.0,
            self.footprint.center(),
            self.footprint.size(),
            perfect
        );

        SliceOutcome::Settled { perfect, trim }
    }
}
