// tests/support/mocks/util.rs
use chrono::{DateTime, TimeZone, Utc};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub struct DummyClock;

impl permalink_core::application::ports::time::Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Always draws the same number, clamped below the requested bound.
pub struct FixedRandom(pub u32);

impl permalink_core::application::ports::random::RandomSource for FixedRandom {
    fn next_below(&self, upper: u32) -> u32 {
        self.0.min(upper.saturating_sub(1))
    }
}
