pub mod data;
mod track;

pub use self::data::{SlotRequest, VerticalSlot};
pub use self::track::Track;

use std::collections::BTreeMap;

use crate::grid::{split_position, Slot};
use crate::pitch::NoteLabel;

pub const DEFAULT_TEMPO: f64 = 120.0;

/// A quantized piece: tracks keyed by their number, plus a single tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    tempo: f64,
    tracks: BTreeMap<usize, Track>,
}

impl Default for Song {
    fn default() -> Self {
        Song::new(DEFAULT_TEMPO)
    }
}

impl Song {
    pub fn new(tempo: f64) -> Self {
        Song {
            tempo,
            tracks: BTreeMap::new(),
        }
    }

    /// A blank grid of `track_count` tracks, each `measure_count` measures long.
    pub fn empty_init(track_count: usize, measure_count: usize) -> Self {
        let mut song = Song::default();
        for number in 0..track_count {
            song.tracks
                .insert(number, Track::with_measures(number, measure_count));
        }
        song
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn set_tempo(&mut self, tempo: f64) {
        self.tempo = tempo;
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn track(&self, number: usize) -> Option<&Track> {
        self.tracks.get(&number)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// The common measure count of every track.
    ///
    /// Tracks only diverge between `add_slot` calls and `normalize`; the
    /// longest track is reported either way.
    pub fn measure_count(&self) -> usize {
        self.tracks
            .values()
            .map(Track::measure_count)
            .max()
            .unwrap_or(0)
    }

    pub fn add_slot(&mut self, request: &SlotRequest) {
        let track = self
            .tracks
            .entry(request.track)
            .or_insert_with(|| Track::new(request.track));

        track.set_instrument(request.instrument.clone(), request.channel);
        track.add_slot(request);
    }

    /// Pads every track with silent measures up to the longest one.
    pub fn normalize(&mut self) {
        let measure_count = self.measure_count();
        for track in self.tracks.values_mut() {
            track.ensure_measures(measure_count);
        }
    }

    /// The full timeline of one pitch bucket, sixteen slots per measure.
    ///
    /// Unknown tracks and octaves outside the grid give an empty timeline.
    pub fn slots_for_pitch(&self, track: usize, octave: i8, label: NoteLabel) -> Vec<Slot> {
        let track = match self.tracks.get(&track) {
            Some(track) => track,
            None => return Vec::new(),
        };

        let mut slots = Vec::new();
        for measure in track.measures() {
            match measure.lane_slots(octave, label) {
                Some(lane) => slots.extend_from_slice(lane),
                None => return Vec::new(),
            }
        }
        slots
    }

    /// Every bucket's state at one absolute sixteenth position, lowest octave first.
    ///
    /// Positions past the end of the track give an empty snapshot.
    pub fn slots_at_instant(&self, track: usize, position: usize) -> Vec<VerticalSlot> {
        let track = match self.tracks.get(&track) {
            Some(track) => track,
            None => return Vec::new(),
        };

        let (measure_index, index) = split_position(position);
        match track.measures().get(measure_index) {
            Some(measure) => measure
                .column(index)
                .into_iter()
                .map(|(pitch, slot)| VerticalSlot { pitch, slot })
                .collect(),
            None => Vec::new(),
        }
    }
}
