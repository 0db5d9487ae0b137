use rimd::{Event, MetaEvent, MidiMessage, SMFFormat, SMFWriter, Track, TrackEvent, SMF};

use crate::importing::data::*;

pub fn smf(division: i16, tracks: Vec<Vec<TrackEvent>>) -> SMF {
    SMF {
        format: SMFFormat::MultiTrack,
        division,
        tracks: tracks
            .into_iter()
            .map(|events| Track {
                copyright: None,
                name: None,
                events,
            })
            .collect(),
    }
}

pub fn midi(vtime: u64, message: MidiMessage) -> TrackEvent {
    TrackEvent {
        vtime,
        event: Event::Midi(message),
    }
}

pub fn tempo(vtime: u64, microseconds_per_quarter: u32) -> TrackEvent {
    TrackEvent {
        vtime,
        event: Event::Meta(MetaEvent::tempo_setting(microseconds_per_quarter)),
    }
}

pub fn to_bytes(smf: SMF) -> Vec<u8> {
    let mut buffer = Vec::new();
    SMFWriter::from_smf(smf)
        .write_all(&mut buffer)
        .expect("in-memory MIDI write");
    buffer
}

pub fn note(tick: u64, key: u8, duration: u64) -> MidiEvent {
    MidiEvent {
        tick,
        kind: EventKind::Note {
            key,
            channel: 0,
            duration,
        },
    }
}

pub fn program(tick: u64, program: u8, channel: u8) -> MidiEvent {
    MidiEvent {
        tick,
        kind: EventKind::ProgramChange { program, channel },
    }
}

pub fn bpm(tick: u64, bpm: f64) -> MidiEvent {
    MidiEvent {
        tick,
        kind: EventKind::Tempo { bpm },
    }
}

pub fn midi_file(ticks_per_quarter: u16, tracks: Vec<Vec<MidiEvent>>) -> MidiFile {
    MidiFile {
        ticks_per_quarter,
        tracks: tracks
            .into_iter()
            .map(|events| MidiTrack { events })
            .collect(),
    }
}
