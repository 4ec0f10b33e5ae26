//! Attempt Limiting
//!
//! Sliding-window limit: at most `max_attempts` events per key within the
//! trailing `window`. Callers count stored events newer than
//! [`AttemptLimit::window_start`] and ask [`AttemptLimit::is_exceeded`].

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptLimit {
    /// Events allowed inside the window before the key is blocked
    pub max_attempts: u32,
    /// Trailing window length
    pub window: Duration,
}

impl AttemptLimit {
    pub const fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
        }
    }

    /// Oldest instant still inside the window (inclusive)
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// Whether `count` events inside the window block further attempts
    pub fn is_exceeded(&self, count: u64) -> bool {
        count >= u64::from(self.max_attempts)
    }

    /// Attempts left before the limit is reached
    pub fn remaining(&self, count: u64) -> u32 {
        u64::from(self.max_attempts)
            .saturating_sub(count)
            .try_into()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let limit = AttemptLimit::new(5, Duration::minutes(15));
        assert!(!limit.is_exceeded(0));
        assert!(!limit.is_exceeded(4));
        assert!(limit.is_exceeded(5));
        assert!(limit.is_exceeded(6));
    }

    #[test]
    fn test_remaining() {
        let limit = AttemptLimit::new(5, Duration::minutes(15));
        assert_eq!(limit.remaining(0), 5);
        assert_eq!(limit.remaining(3), 2);
        assert_eq!(limit.remaining(9), 0);
    }

    #[test]
    fn test_window_start() {
        let limit = AttemptLimit::new(5, Duration::minutes(15));
        let now = Utc::now();
        assert_eq!(limit.window_start(now), now - Duration::minutes(15));
    }
}
