use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::Color;

/// Remaining time for both sides. Driven from outside through [`Clock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub white: Duration,
    pub black: Duration,
    pub running: bool,
}

impl Clock {
    pub fn new(initial_time: Duration) -> Self {
        Self {
            white: initial_time,
            black: initial_time,
            running: false,
        }
    }

    pub fn remaining(&self, side: Color) -> Duration {
        match side {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn start(self) -> Self {
        Self { running: true, ..self }
    }

    pub fn stop(self) -> Self {
        Self { running: false, ..self }
    }

    pub fn tick(self, side: Color, elapsed: Duration) -> Self {
        if !self.running {
            return self;
        }
        match side {
            Color::White => Self {
                white: self.white.saturating_sub(elapsed),
                ..self
            },
            Color::Black => Self {
                black: self.black.saturating_sub(elapsed),
                ..self
            },
        }
    }

    pub fn is_flagged(&self, side: Color) -> bool {
        self.remaining(side).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_only_when_running() {
        let clock = Clock::new(Duration::from_secs(10));
        let stopped = clock.tick(Color::White, Duration::from_secs(3));
        assert_eq!(stopped.white, Duration::from_secs(10));

        let running = clock.start().tick(Color::White, Duration::from_secs(3));
        assert_eq!(running.white, Duration::from_secs(7));
        assert_eq!(running.black, Duration::from_secs(10));
    }

    #[test]
    fn test_flag_falls_at_zero() {
        let clock = Clock::new(Duration::from_secs(2)).start();
        let clock = clock.tick(Color::Black, Duration::from_secs(1));
        assert!(!clock.is_flagged(Color::Black));
        let clock = clock.tick(Color::Black, Duration::from_secs(5));
        assert!(clock.is_flagged(Color::Black));
        assert_eq!(clock.remaining(Color::Black), Duration::ZERO);
        assert!(!clock.is_flagged(Color::White));
    }
}
