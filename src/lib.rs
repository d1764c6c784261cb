//! # Busradio
//!
//! Busradio plays AM tones through the electromagnetic emission of the memory
//! bus. It needs no antenna and no network: a calibrated pattern of memory
//! reads switches bus activity on and off at the carrier frequency.
//!
//! ## Quickstart guide
//!
//! ```sh
//! cargo build --release
//! # tune an AM receiver near the machine, then play 10 s at 1580 Hz
//! target/release/busradio 10 1580
//! # sweep 30-50 kHz in 2 s steps until interrupted
//! target/release/busradio 10 -1
//! ```
//!
//! ## Modules
//!
//! - `clock`: Monotonic tick source.
//! - `memory`: The strided access buffer.
//! - `calibrate`: Access-rate measurement.
//! - `emitter`: Square-wave carrier generation.
//! - `program`: Single-tone and sweep programs.
//! - `config`: JSON configuration.
//! - `util`: Sizes, defaults and helpers.
pub use busradio_core::*;
