use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_time: Duration,
    /// Halfmoves without a pawn move or capture before the game is drawn.
    pub fifty_move_limit: u32,
    pub repetition_limit: usize,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self {
            initial_time: Duration::from_secs(600),
            fifty_move_limit: 100,
            repetition_limit: 3,
        }
    }

    pub fn set_initial_time(&mut self, initial_time: Duration) {
        self.initial_time = initial_time;
    }

    pub fn set_fifty_move_limit(&mut self, halfmoves: u32) {
        self.fifty_move_limit = halfmoves;
    }

    pub fn set_repetition_limit(&mut self, occurrences: usize) {
        self.repetition_limit = occurrences.max(1);
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
