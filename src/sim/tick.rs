//! Per-frame simulation step
//!
//! The cut is handled before motion advances so the trim sees the position
//! the player reacted to, and a cut block never moves again.

use super::stack::{CutOutcome, ScoreReporter, SessionContext, StackController};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cut signal (edge-triggered: set for one frame per player action)
    pub cut: bool,
    /// Idle/demo mode - the autoplayer decides when to cut
    pub idle_mode: bool,
}

/// Advance the stack by one frame of `dt` seconds
pub fn tick<R: ScoreReporter>(
    stack: &mut StackController,
    session: &mut SessionContext<R>,
    input: &TickInput,
    dt: f32,
) -> CutOutcome {
    if stack.is_game_over() {
        return CutOutcome::Ignored;
    }

    let wants_cut = input.cut || (input.idle_mode && autoplayer_wants_cut(stack, session));
    let outcome = if wants_cut {
        stack.cut(session)
    } else {
        CutOutcome::Ignored
    };

    stack.advance(dt);
    outcome
}

/// Demo player: aims for a spot that drifts with the stack height instead of
/// always going for the center, so runs are not endless perfect streaks.
fn autoplayer_wants_cut<R: ScoreReporter>(
    stack: &StackController,
    session: &SessionContext<R>,
) -> bool {
    let (Some(block), Some(parent)) = (stack.active_block(), stack.parent_footprint()) else {
        return false;
    };
    let Some(motion) = block.motion.as_ref() else {
        return false;
    };
    if motion.finished() {
        return true;
    }

    let axis = motion.axis;
    let offset = axis.component(block.footprint.center() - parent.center());
    let reach = session.config().snap_tolerance + axis.component(parent.half_extents()) * 0.25;
    let aim = (stack.score() as f32 * 1.3).sin() * reach;

    // Travel runs from +direction to -direction
    (offset - aim) * -motion.direction >= 0.0
}
