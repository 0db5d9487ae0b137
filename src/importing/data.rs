/// A MIDI file reduced to what the grid needs: note events already paired
/// into durations, program changes, and tempo changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiFile {
    pub ticks_per_quarter: u16,
    pub tracks: Vec<MidiTrack>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MidiTrack {
    pub events: Vec<MidiEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MidiEvent {
    pub tick: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Note { key: u8, channel: u8, duration: u64 },
    ProgramChange { program: u8, channel: u8 },
    Tempo { bpm: f64 },
}

/// Upper bound on the measures a single note may stretch a track to.
pub const DEFAULT_MAX_MEASURES: usize = 10_000;

#[derive(Debug)]
pub struct ImportOptions {
    pub default_tempo: f64,
    /// Notes reaching past this many measures fail the import.
    pub max_measures: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            default_tempo: crate::song::DEFAULT_TEMPO,
            max_measures: DEFAULT_MAX_MEASURES,
        }
    }
}
