//! Access-rate calibration.
//!
//! The [`Calibrator`] times fixed-size batches of buffer accesses for a
//! wall-clock budget and keeps the fastest batch. The fastest batch estimates
//! the unthrottled rate; slower batches only measure contention and preemption.

use crate::clock::{Clock, Ticks, secs_to_ticks, ticks_to_secs};
use crate::memory::AccessBuffer;
use crate::util::{CALIBRATION_BATCH, NamedProgress, TUNE_SECONDS};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, trace};
use serde::Serialize;
use std::time::Duration;

/// Memory accesses per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AccessRate(pub u64);

impl AccessRate {
    /// Accesses per second as a float.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl From<u64> for AccessRate {
    fn from(value: u64) -> Self {
        AccessRate(value)
    }
}

impl std::fmt::Display for AccessRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a calibration run.
#[derive(Clone, Debug, Serialize)]
pub struct Calibration {
    /// Estimated accesses per second
    pub rate: AccessRate,
    /// Number of timed batches
    pub trials: u64,
    /// Accesses per batch
    pub batch_size: u64,
    /// Duration of the fastest batch, at least one tick
    pub min_batch_ticks: Ticks,
    /// Tick rate of the clock used for timing
    pub ticks_per_sec: u64,
}

/// Measures how fast this host can drive accesses through an [`AccessBuffer`].
pub struct Calibrator<C: Clock> {
    clock: C,
    tune_time: Duration,
    batch_size: u64,
    progress: Option<MultiProgress>,
}

impl<C: Clock> Calibrator<C> {
    /// Creates a calibrator.
    ///
    /// # Arguments
    ///
    /// * `clock` - Clock used to time batches
    /// * `tune_time` - Wall-clock budget for all trials
    /// * `batch_size` - Accesses per timed batch, clamped to at least 1
    pub fn new(clock: C, tune_time: Duration, batch_size: u64) -> Self {
        Self {
            clock,
            tune_time,
            batch_size: batch_size.max(1),
            progress: None,
        }
    }

    /// Creates a calibrator with the default budget and batch size.
    pub fn with_defaults(clock: C) -> Self {
        Self::new(
            clock,
            Duration::from_secs_f64(TUNE_SECONDS),
            CALIBRATION_BATCH,
        )
    }

    /// Reports calibration progress on `progress`.
    pub fn with_progress(mut self, progress: MultiProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs batches until the budget is used up and returns the fastest rate.
    ///
    /// At least one batch always runs. A batch measured as zero ticks counts as
    /// one tick.
    pub fn calibrate(&self, buffer: &mut AccessBuffer) -> Calibration {
        info!("Estimating memory accesses per second ...");
        let tps = self.clock.ticks_per_sec();
        let tune_ticks = secs_to_ticks(self.tune_time.as_secs_f64(), tps);
        let bar = self.progress.as_ref().map(|p| {
            p.add(
                ProgressBar::new(self.tune_time.as_millis() as u64)
                    .with_style(ProgressStyle::named_bar("Calibrating")),
            )
        });

        let mut min_ticks = Ticks::MAX;
        let mut trials = 0;
        let tune_start = self.clock.now();
        loop {
            let start = self.clock.now();
            buffer.burst(self.batch_size);
            let ticks = self.clock.now().saturating_sub(start);
            trace!("trial {}: {} ticks", trials, ticks);
            min_ticks = min_ticks.min(ticks);
            trials += 1;

            let elapsed = self.clock.now().saturating_sub(tune_start);
            if let Some(bar) = &bar {
                bar.set_position((ticks_to_secs(elapsed, tps) * 1000.0) as u64);
            }
            if elapsed >= tune_ticks {
                break;
            }
        }
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        if min_ticks == 0 {
            debug!("fastest batch took 0 ticks, clamping to 1");
        }
        let min_ticks = min_ticks.max(1);
        let rate = rate_from_batch(self.batch_size, tps, min_ticks);
        info!(
            "Calibrated {} accesses/s over {} trials (fastest batch {} ticks)",
            rate, trials, min_ticks
        );
        Calibration {
            rate,
            trials,
            batch_size: self.batch_size,
            min_batch_ticks: min_ticks,
            ticks_per_sec: tps,
        }
    }
}

/// `accesses * ticks_per_sec / ticks`, saturating at `u64::MAX`.
///
/// `ticks` of zero is treated as one tick.
pub fn rate_from_batch(accesses: u64, ticks_per_sec: u64, ticks: Ticks) -> AccessRate {
    let rate = accesses as u128 * ticks_per_sec as u128 / ticks.max(1) as u128;
    AccessRate(u64::try_from(rate).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MonotonicClock;
    use crate::util::Size::KB;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Advances by `step` ticks on every read.
    struct StepClock {
        now: Cell<Ticks>,
        step: Ticks,
    }

    impl Clock for StepClock {
        fn now(&self) -> Ticks {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }
        fn ticks_per_sec(&self) -> u64 {
            1_000_000_000
        }
    }

    /// Replays a fixed list of readings.
    struct ScriptedClock {
        readings: RefCell<VecDeque<Ticks>>,
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> Ticks {
            self.readings
                .borrow_mut()
                .pop_front()
                .expect("clock script exhausted")
        }
        fn ticks_per_sec(&self) -> u64 {
            1_000
        }
    }

    #[test]
    fn rate_uses_fastest_batch() -> anyhow::Result<()> {
        let clock = StepClock {
            now: Cell::new(0),
            step: 1_000,
        };
        let mut buffer = AccessBuffer::new(KB(64), 128)?;
        // three clock reads per trial: 10 trials fill 30 µs
        let calibrator = Calibrator::new(&clock, Duration::from_micros(30), 10_000);
        let calibration = calibrator.calibrate(&mut buffer);
        assert_eq!(calibration.trials, 10);
        assert_eq!(calibration.min_batch_ticks, 1_000);
        assert_eq!(calibration.rate, AccessRate(10_000_000_000));
        Ok(())
    }

    #[test]
    fn minimum_wins_over_later_slow_batches() -> anyhow::Result<()> {
        // tune_start, (start, end, check) per trial; budget 1000 ticks = 1 s
        let clock = ScriptedClock {
            readings: RefCell::new(VecDeque::from(vec![
                0, 0, 50, 60, 60, 80, 90, 90, 190, 1_000,
            ])),
        };
        let mut buffer = AccessBuffer::new(KB(64), 128)?;
        let calibration =
            Calibrator::new(&clock, Duration::from_secs(1), 100).calibrate(&mut buffer);
        assert_eq!(calibration.trials, 3);
        assert_eq!(calibration.min_batch_ticks, 20);
        // 100 accesses * 1000 ticks/s / 20 ticks
        assert_eq!(calibration.rate, AccessRate(5_000));
        Ok(())
    }

    #[test]
    fn zero_tick_batch_is_clamped() -> anyhow::Result<()> {
        let clock = ScriptedClock {
            readings: RefCell::new(VecDeque::from(vec![0, 5, 5, 10])),
        };
        let mut buffer = AccessBuffer::new(KB(64), 128)?;
        let calibration =
            Calibrator::new(&clock, Duration::from_millis(10), 10).calibrate(&mut buffer);
        assert_eq!(calibration.trials, 1);
        assert_eq!(calibration.min_batch_ticks, 1);
        assert_eq!(calibration.rate, AccessRate(10_000));
        Ok(())
    }

    #[test]
    fn zero_budget_still_runs_one_trial() -> anyhow::Result<()> {
        let clock = StepClock {
            now: Cell::new(0),
            step: 7,
        };
        let mut buffer = AccessBuffer::new(KB(64), 128)?;
        let calibration = Calibrator::new(&clock, Duration::ZERO, 0).calibrate(&mut buffer);
        assert_eq!(calibration.trials, 1);
        assert_eq!(calibration.batch_size, 1);
        assert!(calibration.rate.0 > 0);
        Ok(())
    }

    #[test]
    fn real_clock_rate_is_positive() -> anyhow::Result<()> {
        let clock = MonotonicClock::new()?;
        let mut buffer = AccessBuffer::new(KB(256), 128)?;
        let calibration = Calibrator::new(clock, Duration::from_millis(50), CALIBRATION_BATCH)
            .calibrate(&mut buffer);
        assert!(calibration.rate.0 > 0);
        assert!(calibration.trials >= 1);
        Ok(())
    }

    #[test]
    fn rate_saturates() {
        assert_eq!(rate_from_batch(u64::MAX, u64::MAX, 1), AccessRate(u64::MAX));
        assert_eq!(rate_from_batch(20_000, 1_000, 0), AccessRate(20_000_000));
    }
}
