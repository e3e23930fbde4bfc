//! Injectable time source
//!
//! The monitor never reads the system clock directly. Latency measurement
//! and trace-id generation both go through the [`Clock`] trait so that tests
//! can drive time deterministically.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// A wall-clock time source, monotonic-enough for latency measurement and
/// millisecond-resolution trace-id generation.
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually advanced clock for tests and simulations
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock();
        *now += Duration::milliseconds(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Convert an elapsed chrono duration to fractional milliseconds, clamped at
/// zero for clocks that step backwards.
pub(crate) fn elapsed_ms(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let elapsed = end - start;
    let ms = match elapsed.num_microseconds() {
        Some(us) => us as f64 / 1000.0,
        // Overflows only past ~292k years of elapsed time
        None => elapsed.num_milliseconds() as f64,
    };
    ms.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
        let start = clock.now();
        clock.advance_ms(42);
        assert_eq!(elapsed_ms(start, clock.now()), 42.0);
    }

    #[test]
    fn elapsed_is_clamped_at_zero() {
        let later = Utc.timestamp_millis_opt(1_700_000_001_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(elapsed_ms(later, earlier), 0.0);
    }

    #[test]
    fn elapsed_keeps_sub_millisecond_precision() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let end = start + Duration::microseconds(1500);
        assert_eq!(elapsed_ms(start, end), 1.5);
    }
}
