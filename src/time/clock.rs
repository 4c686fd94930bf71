//! Wall-clock sources used for the generation time fallback

use std::time::{SystemTime, UNIX_EPOCH};

use super::Timestamp;

/// Source of "now" for packets without a usable embedded time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Host real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A host clock set before 1970 reads as negative Unix time.
        let unix_millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
        };
        Timestamp::from_unix_millis(unix_millis)
    }
}

/// Clock frozen at one instant, for tests and deterministic replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
