//! Iqamah countdown, decremented once per elapsed second

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    carry: Duration,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self {
            remaining_secs: secs,
            carry: Duration::ZERO,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Feed elapsed time; returns true once the countdown reaches zero.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.carry += elapsed;
        while self.carry >= Duration::from_secs(1) && self.remaining_secs > 0 {
            self.carry -= Duration::from_secs(1);
            self.remaining_secs -= 1;
        }
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrements_per_whole_second() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.tick(Duration::from_millis(600)));
        assert_eq!(countdown.remaining_secs(), 3);
        assert!(!countdown.tick(Duration::from_millis(600)));
        assert_eq!(countdown.remaining_secs(), 2);
        assert!(countdown.tick(Duration::from_millis(2000)));
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn zero_length_countdown_is_finished() {
        let mut countdown = Countdown::new(0);
        assert!(countdown.tick(Duration::ZERO));
    }
}
