//! Notifications for the presentation layer
//!
//! The simulation queues events as plain data; whatever renders the stack,
//! plays sounds or moves the camera drains them once per frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::block::Color;

/// How strong the feedback for a cut should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceIntensity {
    /// Partial trim: camera shake plus impact sound
    Normal,
    /// Perfect alignment: smooth camera rise, no shake
    Perfect,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new block appeared at the start of its sweep
    BlockSpawned {
        position: Vec3,
        size: Vec3,
        color: Color,
    },
    /// A block came to rest with its trimmed footprint
    BlockSettled {
        position: Vec3,
        size: Vec3,
        color: Color,
    },
    BlockSliced(SliceIntensity),
    PerfectAlignment,
    ScoreChanged(u32),
    GameOver { final_score: u32 },
}

/// Receiver for game events. Every hook defaults to doing nothing.
pub trait Presenter {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_perfect_alignment(&mut self) {}
    fn on_game_over(&mut self, _final_score: u32) {}
    fn on_block_settled(&mut self, _position: Vec3, _size: Vec3, _color: Color) {}
    fn on_block_spawned(&mut self, _position: Vec3, _size: Vec3, _color: Color) {}
    fn on_block_sliced(&mut self, _intensity: SliceIntensity) {}
}

/// Feed queued events into a presenter, in order
pub fn dispatch<P: Presenter + ?Sized>(
    events: impl IntoIterator<Item = GameEvent>,
    presenter: &mut P,
) {
    for event in events {
        match event {
            GameEvent::BlockSpawned {
                position,
                size,
                color,
            } => presenter.on_block_spawned(position, size, color),
            GameEvent::BlockSettled {
                position,
                size,
                color,
            } => presenter.on_block_settled(position, size, color),
            GameEvent::BlockSliced(intensity) => presenter.on_block_sliced(intensity),
            GameEvent::PerfectAlignment => presenter.on_perfect_alignment(),
            GameEvent::ScoreChanged(score) => presenter.on_score_changed(score),
            GameEvent::GameOver { final_score } => presenter.on_game_over(final_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn on_score_changed(&mut self, score: u32) {
            self.calls.push(format!("score {score}"));
        }

        fn on_perfect_alignment(&mut self) {
            self.calls.push("perfect".to_string());
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.calls.push(format!("over {final_score}"));
        }

        fn on_block_sliced(&mut self, intensity: SliceIntensity) {
            self.calls.push(format!("sliced {intensity:?}"));
        }
    }

    #[test]
    fn test_dispatch_preserves_order_and_skips_defaults() {
        let events = vec![
            GameEvent::PerfectAlignment,
            GameEvent::BlockSettled {
                position: Vec3::ZERO,
                size: Vec3::ONE,
                color: Color::new(0.0, 0.0, 0.0),
            },
            GameEvent::BlockSliced(SliceIntensity::Perfect),
            GameEvent::ScoreChanged(3),
            GameEvent::GameOver { final_score: 3 },
        ];

        let mut recorder = Recorder::default();
        dispatch(events, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["perfect", "sliced Perfect", "score 3", "over 3"]
        );
    }
}
