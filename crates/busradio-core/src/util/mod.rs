//! Utility types and constants used throughout busradio.
//!
//! - [`Size`] - Memory size representation
//! - Defaults for buffer geometry, calibration and sweep ([`DEFAULT_SPAN`], [`SWEEP_HZ`], etc.)
//! - Progress reporting ([`NamedProgress`])
//! - Anonymous memory mapping helpers ([`mmap`], [`munmap`])

mod alloc_util;
mod constants;
mod named_progress;
mod size;

pub use self::alloc_util::*;
pub use self::constants::*;
pub use self::named_progress::NamedProgress;
pub use self::size::Size;
