use crate::emitter::{Emitting, Tone};
use crate::program::Program;
use log::info;

/// Plays programs on an [`Emitting`] sink.
///
/// The radio is the top of the transmit flow: it feeds every tone of a
/// [`Program`] to the emitter in order on the calling thread.
pub struct Radio<E: Emitting> {
    emitter: E,
}

impl<E: Emitting> Radio<E> {
    /// Creates a radio around `emitter`.
    pub fn new(emitter: E) -> Self {
        Self { emitter }
    }

    /// Plays every tone of `program`. Never returns for a sweep.
    ///
    /// Returns the number of tones played.
    pub fn run(&mut self, program: &Program) -> u64 {
        if program.is_endless() {
            info!("Sweep mode, stop with Ctrl-C");
        }
        let played = self.play(program.tones());
        info!("DONE");
        played
    }

    /// Plays `tones` in order and returns how many were played.
    pub fn play(&mut self, tones: impl Iterator<Item = Tone>) -> u64 {
        let mut played = 0;
        for tone in tones {
            self.emitter.emit(tone);
            played += 1;
        }
        played
    }

    /// Gives back the emitter.
    pub fn into_inner(self) -> E {
        self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Playlist;

    #[derive(Default)]
    struct Recorder {
        tones: Vec<Tone>,
    }

    impl Emitting for Recorder {
        fn emit(&mut self, tone: Tone) {
            self.tones.push(tone);
        }
    }

    #[test]
    fn single_program_plays_once() {
        let mut radio = Radio::new(Recorder::default());
        let program = Program::from_args(0.5, 440.0, Playlist::default()).unwrap();
        assert_eq!(radio.run(&program), 1);
        assert_eq!(radio.into_inner().tones, vec![Tone::new(0.5, 440.0)]);
    }

    #[test]
    fn sweep_feeds_playlist_in_order() {
        let mut radio = Radio::new(Recorder::default());
        let program = Program::from_args(5.0, -1.0, Playlist::default()).unwrap();
        assert_eq!(radio.play(program.tones().take(10)), 10);
        let freqs: Vec<f64> = radio
            .into_inner()
            .tones
            .iter()
            .map(|t| t.frequency_hz)
            .collect();
        assert_eq!(
            freqs,
            vec![
                30_000.0, 35_000.0, 40_000.0, 45_000.0, 50_000.0, 30_000.0, 35_000.0, 40_000.0,
                45_000.0, 50_000.0
            ]
        );
    }
}
