//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - No rendering, audio or input-device dependencies

pub mod block;
pub mod events;
pub mod rect;
pub mod stack;
pub mod tick;

pub use block::{Axis, BlockEntity, BlockId, BlockPhase, Color, Motion, SliceOutcome};
pub use events::{GameEvent, Presenter, SliceIntensity, dispatch};
pub use rect::{Alignment, Rectangle, TrimResult, TrimVerdict, trim};
pub use stack::{CutOutcome, ScoreReporter, SessionContext, StackController};
pub use tick::{TickInput, tick};
