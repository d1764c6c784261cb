//! What to play: a single tone or an endless frequency sweep.

use crate::emitter::Tone;
use crate::util::SWEEP_HZ;
use thiserror::Error;

/// Errors for programs built from operator input.
#[derive(Debug, Error, PartialEq)]
pub enum ProgramError {
    /// Duration is negative or not a number
    #[error("invalid duration {0} s")]
    InvalidDuration(f64),
    /// Frequency is zero or not a number
    #[error("invalid frequency {0} Hz")]
    InvalidFrequency(f64),
    /// Sweep needs at least one positive frequency and nothing else
    #[error("sweep playlist must contain positive frequencies only, got {0:?}")]
    InvalidPlaylist(Vec<f64>),
}

/// Ordered carrier frequencies cycled by sweep mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Playlist {
    frequencies_hz: Vec<f64>,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            frequencies_hz: SWEEP_HZ.to_vec(),
        }
    }
}

impl Playlist {
    /// Creates a playlist.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidPlaylist`] if the list is empty or holds
    /// a frequency that is not a positive finite number.
    pub fn new(frequencies_hz: Vec<f64>) -> Result<Self, ProgramError> {
        if frequencies_hz.is_empty() || frequencies_hz.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(ProgramError::InvalidPlaylist(frequencies_hz));
        }
        Ok(Self { frequencies_hz })
    }

    /// Frequencies in play order.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies_hz
    }

    /// Repeats the playlist forever, splitting `duration_secs` evenly over
    /// one pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use busradio_core::program::Playlist;
    ///
    /// let tones: Vec<_> = Playlist::default().sweep(5.0).take(6).collect();
    /// assert_eq!(tones[0].frequency_hz, 30_000.0);
    /// assert_eq!(tones[5].frequency_hz, 30_000.0);
    /// assert!(tones.iter().all(|t| t.duration_secs == 1.0));
    /// ```
    pub fn sweep(&self, duration_secs: f64) -> impl Iterator<Item = Tone> + '_ {
        let step = duration_secs / self.frequencies_hz.len() as f64;
        self.frequencies_hz
            .iter()
            .cycle()
            .map(move |&hz| Tone::new(step, hz))
    }
}

/// A run request.
#[derive(Clone, Debug, PartialEq)]
pub enum Program {
    /// Play one tone, then stop
    Single(Tone),
    /// Cycle the playlist until the process is killed
    Sweep {
        /// Duration of one pass over the playlist
        duration_secs: f64,
        /// Frequencies to cycle
        playlist: Playlist,
    },
}

impl Program {
    /// Builds a program from the command-line values.
    ///
    /// A negative `frequency_hz` selects sweep mode over `playlist`.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or NaN duration and for a zero or NaN
    /// frequency.
    pub fn from_args(
        duration_secs: f64,
        frequency_hz: f64,
        playlist: Playlist,
    ) -> Result<Self, ProgramError> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(ProgramError::InvalidDuration(duration_secs));
        }
        if !frequency_hz.is_finite() || frequency_hz == 0.0 {
            return Err(ProgramError::InvalidFrequency(frequency_hz));
        }
        if frequency_hz < 0.0 {
            Ok(Program::Sweep {
                duration_secs,
                playlist,
            })
        } else {
            Ok(Program::Single(Tone::new(duration_secs, frequency_hz)))
        }
    }

    /// Whether this program never finishes on its own.
    pub fn is_endless(&self) -> bool {
        matches!(self, Program::Sweep { .. })
    }

    /// The tones to play, in order. Unbounded for [`Program::Sweep`].
    pub fn tones(&self) -> Box<dyn Iterator<Item = Tone> + '_> {
        match self {
            Program::Single(tone) => Box::new(std::iter::once(*tone)),
            Program::Sweep {
                duration_secs,
                playlist,
            } => Box::new(playlist.sweep(*duration_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_splits_duration_and_repeats() {
        let program = Program::from_args(5.0, -1.0, Playlist::default()).unwrap();
        assert!(program.is_endless());
        let tones: Vec<Tone> = program.tones().take(15).collect();
        let expected = [30_000.0, 35_000.0, 40_000.0, 45_000.0, 50_000.0];
        for (i, tone) in tones.iter().enumerate() {
            assert_eq!(tone.duration_secs, 1.0);
            assert_eq!(tone.frequency_hz, expected[i % 5]);
        }
    }

    #[test]
    fn positive_frequency_plays_once() {
        let program = Program::from_args(2.5, 1580.0, Playlist::default()).unwrap();
        assert!(!program.is_endless());
        let tones: Vec<Tone> = program.tones().collect();
        assert_eq!(tones, vec![Tone::new(2.5, 1580.0)]);
    }

    #[test]
    fn custom_playlist() {
        let playlist = Playlist::new(vec![1000.0, 2000.0]).unwrap();
        let tones: Vec<Tone> = playlist.sweep(1.0).take(3).collect();
        assert_eq!(
            tones,
            vec![
                Tone::new(0.5, 1000.0),
                Tone::new(0.5, 2000.0),
                Tone::new(0.5, 1000.0)
            ]
        );
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            Program::from_args(-1.0, 100.0, Playlist::default()),
            Err(ProgramError::InvalidDuration(-1.0))
        );
        assert_eq!(
            Program::from_args(1.0, 0.0, Playlist::default()),
            Err(ProgramError::InvalidFrequency(0.0))
        );
        assert!(Program::from_args(f64::NAN, 100.0, Playlist::default()).is_err());
        assert!(Playlist::new(vec![]).is_err());
        assert!(Playlist::new(vec![1000.0, -5.0]).is_err());
    }
}
