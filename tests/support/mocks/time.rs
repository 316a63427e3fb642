// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use civiccare::application::ports::time::Clock;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
});

/// Deterministic base timestamp for every test.
pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Starts at [`fixed_now`] and moves one second forward on every reading, so
/// records created in sequence have distinct, increasing timestamps.
#[derive(Debug, Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        fixed_now() + Duration::seconds(tick)
    }
}
