//! # Busradio Core
//!
//! `busradio-core` turns memory-bus traffic into an AM carrier. Bursts of
//! strided memory reads alternate with idle spins at a chosen frequency, and
//! the resulting on/off keyed emission of the bus can be picked up by a
//! nearby AM receiver.
//!
//! ## Architecture Overview
//!
//! - [`clock::Clock`] - Monotonic tick source, implemented by [`clock::MonotonicClock`].
//! - [`memory::AccessBuffer`] - The "antenna": a large buffer walked by a strided cursor.
//! - [`calibrate::Calibrator`] - Measures how many accesses per second this host achieves.
//! - [`emitter::Emitter`] - Paces accesses into a square wave at a carrier frequency,
//!   behind the [`emitter::Emitting`] trait.
//! - [`program::Program`] - A single tone or an endless sweep over a [`program::Playlist`].
//! - [`Radio`] - Plays a program on an emitter.
//! - [`config::RadioConfig`] - JSON tunables for all of the above.
//!
//! ## Platform Support
//!
//! Timing relies on `CLOCK_MONOTONIC` and the buffer on anonymous `mmap`, so
//! the crate targets Linux. Everything runs on the calling thread and waits by
//! spinning; no sleep or async primitive is involved.

#![warn(missing_docs)]

pub mod calibrate;
pub mod clock;
pub mod config;
pub mod emitter;
pub mod memory;
pub mod program;
mod radio;
pub mod util;

pub use crate::radio::Radio;
