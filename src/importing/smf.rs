use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use rimd::{Event, MetaCommand, MetaEvent, MidiMessage, SMF};

use super::data::*;
use super::error::{ErrorType, ImportError};

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const PROGRAM_CHANGE: u8 = 0xC0;

const MICROSECONDS_PER_MIN: f64 = 60_000_000.0;

/// Flattens a parsed standard MIDI file into absolute-tick events, pairing
/// every note-on with the note-off that ends it.
pub fn midi_file_from_smf(smf: &SMF) -> Result<MidiFile, ImportError> {
    let ticks_per_quarter = match smf.division {
        division if division > 0 => division as u16,
        division => {
            return Err(ImportError::new(ErrorType::UnsupportedDivision {
                division,
            }))
        }
    };

    let tracks = smf
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| convert_track(index, track))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MidiFile {
        ticks_per_quarter,
        tracks,
    })
}

fn convert_track(index: usize, track: &rimd::Track) -> Result<MidiTrack, ImportError> {
    let mut events = Vec::new();
    let mut open_notes: HashMap<(u8, u8), VecDeque<usize>> = HashMap::new();
    let mut tick: u64 = 0;

    for track_event in &track.events {
        tick = tick
            .checked_add(track_event.vtime)
            .ok_or_else(|| ImportError::new(ErrorType::TickOverflow { track: index }))?;

        match track_event.event {
            Event::Midi(ref message) => {
                convert_message(index, message, tick, &mut events, &mut open_notes)?
            }
            Event::Meta(ref meta) => {
                if let Some(bpm) = tempo_bpm(meta) {
                    events.push(MidiEvent {
                        tick,
                        kind: EventKind::Tempo { bpm },
                    });
                }
            }
        }
    }

    let unclosed: usize = open_notes.values().map(VecDeque::len).sum();
    if unclosed > 0 {
        debug!(
            "Track {} has {} notes without a note-off, treating them as zero length",
            index, unclosed
        );
    }

    Ok(MidiTrack { events })
}

fn convert_message(
    track: usize,
    message: &MidiMessage,
    tick: u64,
    events: &mut Vec<MidiEvent>,
    open_notes: &mut HashMap<(u8, u8), VecDeque<usize>>,
) -> Result<(), ImportError> {
    let status = match message.data.first() {
        Some(&status) => status,
        None => return Ok(()),
    };
    let channel = status & 0x0F;
    let data = |index: usize| message.data.get(index).copied().unwrap_or(0);

    match status & 0xF0 {
        NOTE_ON if data(2) > 0 => {
            let key = data(1);
            open_notes
                .entry((channel, key))
                .or_default()
                .push_back(events.len());
            events.push(MidiEvent {
                tick,
                kind: EventKind::Note {
                    key,
                    channel,
                    duration: 0,
                },
            });
        }
        NOTE_ON | NOTE_OFF => {
            let opened = open_notes
                .get_mut(&(channel, data(1)))
                .and_then(VecDeque::pop_front);

            if let Some(index) = opened {
                let start = events[index].tick;
                if let EventKind::Note {
                    ref mut duration, ..
                } = events[index].kind
                {
                    *duration = tick
                        .checked_sub(start)
                        .ok_or_else(|| ImportError::new(ErrorType::TickOverflow { track }))?;
                }
            }
        }
        PROGRAM_CHANGE => events.push(MidiEvent {
            tick,
            kind: EventKind::ProgramChange {
                program: data(1),
                channel,
            },
        }),
        _ => {}
    }

    Ok(())
}

fn tempo_bpm(meta: &MetaEvent) -> Option<f64> {
    match meta.command {
        MetaCommand::TempoSetting => {
            let microseconds = meta
                .data
                .iter()
                .take(4)
                .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

            if microseconds == 0 {
                warn!("Ignoring tempo event with a zero microseconds-per-quarter value");
                None
            } else {
                Some(MICROSECONDS_PER_MIN / f64::from(microseconds))
            }
        }
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn notes_are_paired_with_their_note_off() {
        let smf = smf(
            480,
            vec![vec![
                midi(0, MidiMessage::note_on(71, 100, 0)),
                midi(480, MidiMessage::note_off(71, 0, 0)),
                midi(0, MidiMessage::note_on(60, 100, 0)),
                // velocity zero doubles as a note-off
                midi(120, MidiMessage::note_on(60, 0, 0)),
            ]],
        );

        let file = midi_file_from_smf(&smf).unwrap();

        assert_eq!(file.ticks_per_quarter, 480);
        assert_eq!(
            file.tracks[0].events,
            vec![
                MidiEvent {
                    tick: 0,
                    kind: EventKind::Note {
                        key: 71,
                        channel: 0,
                        duration: 480
                    }
                },
                MidiEvent {
                    tick: 480,
                    kind: EventKind::Note {
                        key: 60,
                        channel: 0,
                        duration: 120
                    }
                },
            ]
        );
    }

    #[test]
    fn overlapping_notes_on_one_key_close_in_order() {
        let smf = smf(
            96,
            vec![vec![
                midi(0, MidiMessage::note_on(64, 90, 2)),
                midi(10, MidiMessage::note_on(64, 90, 2)),
                midi(10, MidiMessage::note_off(64, 0, 2)),
                midi(30, MidiMessage::note_off(64, 0, 2)),
            ]],
        );

        let file = midi_file_from_smf(&smf).unwrap();
        let durations: Vec<u64> = file.tracks[0]
            .events
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Note { duration, .. } => Some(duration),
                _ => None,
            })
            .collect();

        assert_eq!(durations, vec![20, 40]);
    }

    #[test]
    fn unclosed_notes_have_zero_duration() {
        let smf = smf(96, vec![vec![midi(5, MidiMessage::note_on(50, 90, 0))]]);

        let file = midi_file_from_smf(&smf).unwrap();
        assert_eq!(
            file.tracks[0].events[0].kind,
            EventKind::Note {
                key: 50,
                channel: 0,
                duration: 0
            }
        );
    }

    #[test]
    fn program_and_tempo_events_are_kept() {
        let smf = smf(
            480,
            vec![vec![
                tempo(0, 500_000),
                midi(0, MidiMessage::program_change(40, 3)),
                tempo(960, 400_000),
            ]],
        );

        let file = midi_file_from_smf(&smf).unwrap();
        assert_eq!(
            file.tracks[0].events,
            vec![
                MidiEvent {
                    tick: 0,
                    kind: EventKind::Tempo { bpm: 120.0 }
                },
                MidiEvent {
                    tick: 0,
                    kind: EventKind::ProgramChange {
                        program: 40,
                        channel: 3
                    }
                },
                MidiEvent {
                    tick: 960,
                    kind: EventKind::Tempo { bpm: 150.0 }
                },
            ]
        );
    }

    #[test]
    fn timecode_division_is_rejected() {
        let mut smf = smf(480, vec![]);
        smf.division = -7688;

        let error = midi_file_from_smf(&smf).unwrap_err();
        assert_eq!(
            error.error,
            ErrorType::UnsupportedDivision { division: -7688 }
        );
    }

    #[test]
    fn delta_times_past_the_tick_range_fail_the_track() {
        let smf = smf(
            480,
            vec![
                vec![midi(0, MidiMessage::note_on(60, 100, 0))],
                vec![
                    midi(1 << 62, MidiMessage::note_on(60, 100, 0)),
                    midi(1 << 62, MidiMessage::note_on(62, 100, 0)),
                    midi(1 << 62, MidiMessage::note_on(64, 100, 0)),
                    midi(1 << 62, MidiMessage::note_on(65, 100, 0)),
                ],
            ],
        );

        let error = midi_file_from_smf(&smf).unwrap_err();
        assert_eq!(error.error, ErrorType::TickOverflow { track: 1 });
    }
}
