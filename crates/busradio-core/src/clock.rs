//! Monotonic tick source.
//!
//! All timing in busradio is expressed in [`Ticks`] of a [`Clock`]. The clock is
//! constructed once at startup and only read afterwards.

use crate::util::NANOS_PER_SEC;
use thiserror::Error;

/// One unit of a [`Clock`]'s counting domain.
pub type Ticks = u64;

/// A monotonic clock with a fixed tick rate.
pub trait Clock {
    /// Returns the current tick count. Successive calls never decrease.
    fn now(&self) -> Ticks;

    /// Returns how many ticks make up one second.
    fn ticks_per_sec(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Ticks {
        (**self).now()
    }

    fn ticks_per_sec(&self) -> u64 {
        (**self).ticks_per_sec()
    }
}

/// Errors that can occur when setting up the platform clock.
#[derive(Debug, Error)]
pub enum ClockError {
    /// `clock_gettime` rejected the monotonic clock
    #[error("monotonic clock unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
}

/// `CLOCK_MONOTONIC` in nanoseconds.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock(());

impl MonotonicClock {
    /// Probes the platform monotonic clock.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Unavailable`] if the clock cannot be read.
    pub fn new() -> Result<Self, ClockError> {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        let r = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        if r != 0 {
            return Err(ClockError::Unavailable(std::io::Error::last_os_error()));
        }
        Ok(Self(()))
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Ticks {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // cannot fail once probed in `new`
        unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        (ts.tv_sec as u64)
            .wrapping_mul(NANOS_PER_SEC)
            .wrapping_add(ts.tv_nsec as u64)
    }

    fn ticks_per_sec(&self) -> u64 {
        NANOS_PER_SEC
    }
}

/// Converts seconds to ticks, truncating. Negative and NaN inputs give 0.
pub fn secs_to_ticks(secs: f64, ticks_per_sec: u64) -> Ticks {
    (secs * ticks_per_sec as f64) as Ticks
}

/// Converts ticks to seconds.
pub fn ticks_to_secs(ticks: Ticks, ticks_per_sec: u64) -> f64 {
    ticks as f64 / ticks_per_sec as f64
}
