use std::{
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::Result;
use busradio_bin::init_logging_with_progress;
use busradio_core::Radio;
use busradio_core::calibrate::{AccessRate, Calibration, Calibrator};
use busradio_core::clock::{Clock, MonotonicClock};
use busradio_core::config::RadioConfig;
use busradio_core::emitter::Emitter;
use busradio_core::memory::AccessBuffer;
use busradio_core::program::Program;
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

/// CLI arguments for the `busradio` binary.
///
/// Plays a tone through memory bus emissions. Tune an AM receiver close to the
/// machine to hear it.
#[derive(Debug, Parser, Serialize, Clone)]
#[command(name = "busradio", version)]
struct CliArgs {
    /// Run time in seconds. In sweep mode, the length of one pass.
    duration: f64,
    /// Carrier frequency in Hz. A negative value sweeps the playlist until interrupted.
    #[clap(allow_negative_numbers = true)]
    frequency: f64,
    /// Memory accesses per second. Skips calibration when given.
    access_rate: Option<u64>,
    /// JSON configuration file.
    #[clap(long = "config")]
    config: Option<String>,
    /// Calibration budget in seconds, overrides the config file.
    #[clap(long = "tune-seconds")]
    tune_seconds: Option<f64>,
    /// Write the calibration report to this file (JSON format).
    #[clap(long = "output")]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    args: &'a CliArgs,
    config: &'a RadioConfig,
    ticks_per_sec: u64,
    access_rate: AccessRate,
    calibration: Option<Calibration>,
}

impl RunReport<'_> {
    fn save_to_file(&self, filename: &str) -> Result<()> {
        let file = File::create(filename)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!("Report saved to {}", filename);
        Ok(())
    }
}

fn main() -> Result<()> {
    let progress = init_logging_with_progress()?;

    let args = CliArgs::parse();
    info!("CLI args: {:?}", args);

    let mut config = match &args.config {
        Some(path) => RadioConfig::from_jsonfile(path)?,
        None => RadioConfig::default(),
    };
    if let Some(tune_seconds) = args.tune_seconds {
        config.tune_seconds = tune_seconds;
    }
    let program = Program::from_args(args.duration, args.frequency, config.playlist()?)?;

    let clock = MonotonicClock::new()?;
    info!("ticks_per_sec = {}", clock.ticks_per_sec());
    let mut buffer = AccessBuffer::new(config.span(), config.stride)?;

    let (access_rate, calibration) = match args.access_rate {
        Some(rate) => (AccessRate(rate), None),
        None => {
            let calibration = Calibrator::new(clock, config.tune_time()?, config.batch_size)
                .with_progress(progress)
                .calibrate(&mut buffer);
            (calibration.rate, Some(calibration))
        }
    };
    info!("mem_access_per_sec = {}", access_rate);
    if access_rate.0 == 0 {
        warn!("access rate is 0, every tone will be silent");
    }

    if let Some(output) = &args.output {
        RunReport {
            args: &args,
            config: &config,
            ticks_per_sec: clock.ticks_per_sec(),
            access_rate,
            calibration,
        }
        .save_to_file(output)?;
    }

    let mut radio = Radio::new(Emitter::new(clock, buffer, access_rate));
    radio.run(&program);
    Ok(())
}
