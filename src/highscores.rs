//! Best score tracking
//!
//! Receives the final score of every run through [`ScoreReporter`]. Kept in
//! memory for the lifetime of the process; storing it anywhere is up to the
//! caller (the type is serde-serializable).

use serde::{Deserialize, Serialize};

use crate::sim::ScoreReporter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Best score ever reported
    pub best: u32,
    /// Runs reported so far
    pub runs: u32,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        self.runs += 1;
        if score <= self.best {
            return false;
        }
        self.best = score;
        log::info!("New best score: {}", score);
        true
    }
}

impl ScoreReporter for HighScores {
    fn report_final_score(&mut self, score: u32) {
        let new_best = self.record(score);
        log::debug!("Run {} scored {} (new best: {})", self.runs, score, new_best);
    }
}
