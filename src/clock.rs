//! Monotonic time sources.
//!
//! The reporter never reads the platform clock directly; it goes through the
//! `Clock` trait so tests can script the readings.

use crate::{Error, ErrorKind};

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds since an arbitrary per-clock epoch.
pub type Timestamp = u64;

/// A monotonic time source with millisecond resolution.
pub trait Clock {
    /// Reads the current timestamp.
    fn now(&self) -> Result<Timestamp, Error>;
}

/// Milliseconds elapsed from `start` to `end`.
///
/// Saturates at zero, so the result is non-negative even when a clock
/// misbehaves and hands back an earlier reading.
pub fn duration_ms(start: Timestamp, end: Timestamp) -> u64 {
    end.saturating_sub(start)
}

/// The production clock, anchored to `std::time::Instant` at construction.
pub struct Monotonic {
    origin: Instant,
}

impl Monotonic {
    pub fn new() -> Self {
        Monotonic { origin: Instant::now() }
    }
}

impl Default for Monotonic {
    fn default() -> Self {
        Monotonic::new()
    }
}

impl Clock for Monotonic {
    fn now(&self) -> Result<Timestamp, Error> {
        Ok(self.origin.elapsed().as_millis() as Timestamp)
    }
}

/// A clock which replays a pre-programmed sequence of readings.
///
/// Useful for asserting on exact durations in tests. Once the sequence is
/// exhausted, the final reading repeats. An empty sequence makes every
/// reading fail, which exercises the reporter's clock-error path.
pub struct Scripted {
    readings: Vec<Timestamp>,
    cursor: Cell<usize>,
}

impl Scripted {
    pub fn new<I>(readings: I) -> Self
        where I: IntoIterator<Item=Timestamp> {
        Scripted {
            readings: readings.into_iter().collect(),
            cursor: Cell::new(0),
        }
    }

    /// A clock whose every reading fails.
    pub fn broken() -> Self {
        Scripted::new(Vec::new())
    }
}

impl Clock for Scripted {
    fn now(&self) -> Result<Timestamp, Error> {
        if self.readings.is_empty() {
            return Err(ErrorKind::ClockUnavailable("no scripted readings left".to_owned()).into());
        }

        let index = self.cursor.get().min(self.readings.len() - 1);
        self.cursor.set(index + 1);

        Ok(self.readings[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_zero_for_identical_readings() {
        assert_eq!(duration_ms(42, 42), 0);
    }

    #[test]
    fn duration_saturates_rather_than_underflowing() {
        assert_eq!(duration_ms(100, 40), 0);
    }

    #[test]
    fn scripted_clock_replays_then_repeats_final_reading() {
        let clock = Scripted::new(vec![5, 10]);

        assert_eq!(clock.now().unwrap(), 5);
        assert_eq!(clock.now().unwrap(), 10);
        assert_eq!(clock.now().unwrap(), 10);
    }

    #[test]
    fn broken_clock_always_errors() {
        let clock = Scripted::broken();

        assert!(clock.now().is_err());
        assert!(clock.now().is_err());
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = Monotonic::new();

        let a = clock.now().unwrap();
        let b = clock.now().unwrap();
        assert!(b >= a);
    }
}
