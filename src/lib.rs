#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate lazy_static;

pub mod colors;
mod error;
pub mod formatting;
pub mod grid;
pub mod importing;
pub mod instruments;
pub mod pitch;
pub mod song;

#[cfg(test)]
mod test_helpers;

use std::path::Path;

pub use crate::grid::{Slot, SLOTS_PER_MEASURE};
pub use crate::importing::data::ImportOptions;
pub use crate::importing::error::{ErrorType, ImportError};
pub use crate::pitch::{NoteLabel, Octave, Pitch};
pub use crate::song::{Song, Track, VerticalSlot};

/// Reads a standard MIDI file from disk and quantizes it into a song.
pub fn import_file<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<Song, ImportError> {
    let path = path.as_ref();
    let filename = path.display().to_string();

    let smf = rimd::SMF::from_file(path).map_err(|err| {
        ImportError::new(ErrorType::Midi {
            message: err.to_string(),
        })
        .in_file(filename.as_str())
    })?;

    importing::import_smf(&smf, options).map_err(|err| err.in_file(filename))
}

/// Quantizes an in-memory standard MIDI file.
pub fn import_bytes(bytes: &[u8], options: &ImportOptions) -> Result<Song, ImportError> {
    let mut reader = bytes;

    let smf = rimd::SMF::from_reader(&mut reader).map_err(|err| {
        ImportError::new(ErrorType::Midi {
            message: err.to_string(),
        })
    })?;

    importing::import_smf(&smf, options)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use rimd::MidiMessage;

    fn simple_piece() -> Vec<u8> {
        to_bytes(smf(
            480,
            vec![vec![
                tempo(0, 500_000),
                midi(0, MidiMessage::program_change(0, 0)),
                midi(0, MidiMessage::note_on(60, 100, 0)),
                midi(120, MidiMessage::note_off(60, 0, 0)),
                midi(3960, MidiMessage::note_on(71, 100, 0)),
                midi(480, MidiMessage::note_off(71, 0, 0)),
            ]],
        ))
    }

    #[test]
    fn import_bytes_reads_a_written_file() {
        let song = import_bytes(&simple_piece(), &ImportOptions::default()).unwrap();

        assert_eq!(song.tempo(), 120.0);
        assert_eq!(song.measure_count(), 3);
        assert_eq!(song.track(0).unwrap().instrument(), Some("Acoustic Grand Piano"));

        let chord = song.slots_at_instant(0, 35);
        let active: Vec<_> = chord.iter().filter(|v| v.slot.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].pitch.label, NoteLabel::B);
        assert_eq!(active[0].slot, Slot::Sustain);
    }

    #[test]
    fn importing_twice_gives_equal_songs() {
        let bytes = simple_piece();
        let first = import_bytes(&bytes, &ImportOptions::default()).unwrap();
        let second = import_bytes(&bytes, &ImportOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_is_a_midi_error() {
        let error = import_bytes(b"not a midi file", &ImportOptions::default()).unwrap_err();
        assert!(matches!(error.error, ErrorType::Midi { .. }));
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = import_file("/nonexistent/piece.mid", &ImportOptions::default()).unwrap_err();
        assert_eq!(error.filename.as_deref(), Some("/nonexistent/piece.mid"));
        assert!(matches!(error.error, ErrorType::Midi { .. }));
    }
}
