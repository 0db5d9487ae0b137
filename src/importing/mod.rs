pub mod data;
pub mod error;
pub mod smf;

use log::{debug, info};

use self::data::*;
use self::error::{ErrorType, ImportError};
use crate::grid::SLOTS_PER_MEASURE;
use crate::instruments;
use crate::pitch;
use crate::song::{SlotRequest, Song};

/// Sixteenth notes per quarter note in 4/4.
const SIXTEENTHS_PER_QUARTER: u16 = (SLOTS_PER_MEASURE / 4) as u16;

/// Quantizes every note of `file` into a new song.
///
/// Any note with a key outside 0..=127, or one ending past
/// `options.max_measures`, fails the whole import.
pub fn import_midi(file: &MidiFile, options: &ImportOptions) -> Result<Song, ImportError> {
    let ticks_per_sixteenth = u64::from((file.ticks_per_quarter / SIXTEENTHS_PER_QUARTER).max(1));

    info!(
        "ticks per beat: {}, ticks per sixteenth: {}",
        file.ticks_per_quarter, ticks_per_sixteenth
    );

    let mut song = Song::new(options.default_tempo);

    for (track_number, track) in file.tracks.iter().enumerate() {
        let requests = slot_requests(
            track_number,
            track,
            ticks_per_sixteenth,
            options.max_measures,
            &mut song,
        )?;
        for request in &requests {
            song.add_slot(request);
        }
    }

    song.normalize();
    Ok(song)
}

pub fn import_smf(smf: &rimd::SMF, options: &ImportOptions) -> Result<Song, ImportError> {
    let file = smf::midi_file_from_smf(smf)?;
    import_midi(&file, options)
}

fn slot_requests(
    track_number: usize,
    track: &MidiTrack,
    ticks_per_sixteenth: u64,
    max_measures: usize,
    song: &mut Song,
) -> Result<Vec<SlotRequest>, ImportError> {
    let mut instrument: Option<String> = None;
    let mut instrument_channel: Option<u8> = None;
    let mut requests = Vec::new();

    for event in &track.events {
        match event.kind {
            EventKind::ProgramChange { program, channel } => {
                instrument = instruments::program_name(program).map(str::to_owned);
                instrument_channel = Some(channel);
            }

            EventKind::Tempo { bpm } => {
                info!("detected tempo: {}", bpm);
                song.set_tempo(bpm);
            }

            EventKind::Note { key, duration, .. } => {
                let pitch = pitch::quantize(key).map_err(|_| {
                    ImportError::new(ErrorType::KeyOutOfRange {
                        track: track_number,
                        tick: event.tick,
                        key,
                    })
                })?;

                let start = event.tick / ticks_per_sixteenth;
                let length = (duration / ticks_per_sixteenth).max(1);

                let measures = start
                    .saturating_add(length)
                    .div_ceil(SLOTS_PER_MEASURE as u64);
                if measures > max_measures as u64 {
                    return Err(ImportError::new(ErrorType::TooManyMeasures {
                        track: track_number,
                        tick: event.tick,
                        measures,
                        limit: max_measures,
                    }));
                }

                // both fit in usize once the measure limit holds
                let start = start as usize;
                let length = length as usize;

                let request = SlotRequest {
                    instrument: instrument.clone(),
                    channel: instrument_channel,
                    ..SlotRequest::new(track_number, pitch, start, length)
                };

                debug!(
                    "Note{{track: {}, instrument: {:?}, channel: {:?}, key: {}, tick: {}, ticks: {}, start: {}, length: {}, note: {}{}}}",
                    track_number,
                    request.instrument,
                    request.channel,
                    key,
                    event.tick,
                    duration,
                    start,
                    length,
                    pitch.label,
                    pitch.octave,
                );

                requests.push(request);
            }
        }
    }

    Ok(requests)
}
