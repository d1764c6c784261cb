//! Square-wave carrier generation.
//!
//! Each carrier cycle is one burst of back-to-back buffer accesses followed by
//! a spin on the clock until the absolute end of the cycle. Dense and idle
//! halves alternate at the carrier rate, which on/off keys the bus emission.

use crate::calibrate::AccessRate;
use crate::clock::{Clock, Ticks, secs_to_ticks};
use crate::memory::AccessBuffer;
use log::{debug, info, warn};
use serde::Serialize;

/// A carrier frequency held for a duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tone {
    /// How long to emit, in seconds
    pub duration_secs: f64,
    /// Carrier frequency in Hz
    pub frequency_hz: f64,
}

impl Tone {
    /// Creates a new tone.
    pub fn new(duration_secs: f64, frequency_hz: f64) -> Self {
        Self {
            duration_secs,
            frequency_hz,
        }
    }
}

/// Per-tone timing derived from the clock rate and the access rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmissionPlan {
    /// Length of one carrier cycle, at least one tick
    pub ticks_per_cycle: Ticks,
    /// Accesses performed in the active half of each cycle
    pub accesses_per_half_cycle: u64,
}

impl EmissionPlan {
    /// Derives the plan for `frequency_hz`.
    ///
    /// `frequency_hz` must be positive. When the access rate is below twice the
    /// frequency the burst is empty and the carrier degenerates to idling; this
    /// is the upper frequency limit of the scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use busradio_core::calibrate::AccessRate;
    /// use busradio_core::emitter::EmissionPlan;
    ///
    /// let plan = EmissionPlan::new(1_000_000_000, AccessRate(20_000), 1000.0);
    /// assert_eq!(plan.ticks_per_cycle, 1_000_000);
    /// assert_eq!(plan.accesses_per_half_cycle, 10);
    /// ```
    pub fn new(ticks_per_sec: u64, rate: AccessRate, frequency_hz: f64) -> Self {
        let ticks_per_cycle = (ticks_per_sec as f64 / frequency_hz) as Ticks;
        let accesses_per_half_cycle = (rate.as_f64() / (2.0 * frequency_hz)) as u64;
        Self {
            ticks_per_cycle: ticks_per_cycle.max(1),
            accesses_per_half_cycle,
        }
    }

    /// Whether the burst phase performs no accesses.
    pub fn is_idle(&self) -> bool {
        self.accesses_per_half_cycle == 0
    }
}

/// A sink for tones.
///
/// Implemented by [`Emitter`] for real transmission; the [`Radio`](crate::Radio)
/// orchestrator only depends on this trait.
pub trait Emitting {
    /// Emits `tone` until its duration has elapsed.
    fn emit(&mut self, tone: Tone);
}

/// Drives an [`AccessBuffer`] as a square-wave AM carrier.
pub struct Emitter<C: Clock> {
    clock: C,
    buffer: AccessBuffer,
    rate: AccessRate,
}

impl<C: Clock> Emitter<C> {
    /// Creates an emitter sized for `rate` accesses per second.
    pub fn new(clock: C, buffer: AccessBuffer, rate: AccessRate) -> Self {
        Self {
            clock,
            buffer,
            rate,
        }
    }

    /// The access rate bursts are sized for.
    pub fn rate(&self) -> AccessRate {
        self.rate
    }

    /// Timing plan for a carrier at `frequency_hz`.
    pub fn plan(&self, frequency_hz: f64) -> EmissionPlan {
        EmissionPlan::new(self.clock.ticks_per_sec(), self.rate, frequency_hz)
    }

    /// Emits `tone` and returns the number of carrier cycles run.
    ///
    /// Every cycle waits for an absolute deadline, so a burst that overruns
    /// its cycle shortens the following wait instead of drifting the carrier.
    /// Tick arithmetic saturates at `u64::MAX`.
    pub fn square_am_signal(&mut self, tone: &Tone) -> u64 {
        let plan = self.plan(tone.frequency_hz);
        debug!("{:?}", plan);
        if plan.is_idle() {
            warn!(
                "{:.0} Hz exceeds what {} accesses/s can modulate, emitting silence",
                tone.frequency_hz, self.rate
            );
        }

        let mut cycle_start = self.clock.now();
        let end = cycle_start
            .saturating_add(secs_to_ticks(tone.duration_secs, self.clock.ticks_per_sec()));
        let mut cycles = 0;
        while cycle_start < end {
            self.buffer.burst(plan.accesses_per_half_cycle);
            let deadline = cycle_start.saturating_add(plan.ticks_per_cycle);
            while self.clock.now() < deadline {
                std::hint::spin_loop();
            }
            cycle_start = deadline;
            cycles += 1;
        }
        cycles
    }
}

impl<C: Clock> Emitting for Emitter<C> {
    fn emit(&mut self, tone: Tone) {
        info!(
            "Playing / {:.3} seconds / {:4.0} Hz",
            tone.duration_secs, tone.frequency_hz
        );
        let cycles = self.square_am_signal(&tone);
        debug!("{} cycles", cycles);
    }
}
