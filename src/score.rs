//! Score display sinks
//!
//! The game pushes both scores whenever a point is scored (and once at
//! startup). On the web the sink writes into two DOM elements.

use crate::sim::Score;

/// Consumer of score updates
pub trait ScoreSink {
    fn update(&mut self, score: Score);
}

/// Remembers the latest pushed score
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    pub latest: Option<Score>,
    /// Number of updates received
    pub updates: u32,
}

impl ScoreSink for ScoreBoard {
    fn update(&mut self, score: Score) {
        self.latest = Some(score);
        self.updates += 1;
    }
}

/// Writes score changes to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn update(&mut self, score: Score) {
        log::info!("Score: player {} - computer {}", score.player, score.computer);
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for &mut S {
    fn update(&mut self, score: Score) {
        (**self).update(score);
    }
}
