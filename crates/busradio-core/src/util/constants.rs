use super::Size;

/// Cache line size (64 bytes) for x86_64
pub const CL_SIZE: usize = 64;

/// Default cursor stride in bytes. Two cache lines so adjacent-line prefetch
/// does not hide the next access.
pub const DEFAULT_STRIDE: usize = 2 * CL_SIZE;

/// Default span of the masked access window (8 MiB)
pub const DEFAULT_SPAN: Size = Size::MB(8);

/// Number of accesses per calibration trial
pub const CALIBRATION_BATCH: u64 = 10_000;

/// Default wall-clock budget for calibration in seconds
pub const TUNE_SECONDS: f64 = 2.0;

/// Carrier frequencies of the default sweep playlist in Hz
pub const SWEEP_HZ: [f64; 5] = [30_000.0, 35_000.0, 40_000.0, 45_000.0, 50_000.0];

/// Nanoseconds per second
pub const NANOS_PER_SEC: u64 = 1_000_000_000;
