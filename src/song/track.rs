use log::warn;

use super::data::SlotRequest;
use crate::grid::{split_position, Measure, Slot};
use crate::pitch::Octave;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    number: usize,
    instrument: Option<String>,
    channel: Option<u8>,
    measures: Vec<Measure>,
}

impl Track {
    pub fn new(number: usize) -> Self {
        Track {
            number,
            ..Track::default()
        }
    }

    pub fn with_measures(number: usize, measure_count: usize) -> Self {
        let mut track = Track::new(number);
        track.ensure_measures(measure_count);
        track
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn instrument(&self) -> Option<&str> {
        self.instrument.as_deref()
    }

    pub fn channel(&self) -> Option<u8> {
        self.channel
    }

    pub fn set_instrument(&mut self, instrument: Option<String>, channel: Option<u8>) {
        self.instrument = instrument;
        self.channel = channel;
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    /// Appends silent measures until the track holds at least `count`.
    pub fn ensure_measures(&mut self, count: usize) {
        if self.measures.len() < count {
            self.measures.resize_with(count, Measure::new);
        }
    }

    /// Writes an onset at `request.start` followed by sustains for the rest of
    /// the note, growing the track when the note runs past its last measure.
    ///
    /// A zero length still writes the onset.
    pub fn add_slot(&mut self, request: &SlotRequest) {
        if Octave::new(request.octave).is_none() {
            warn!(
                "Dropped note on track {} at octave {} {}: outside the grid",
                self.number, request.octave, request.label
            );
            return;
        }

        let length = request.length.max(1);

        for offset in 0..length {
            let (measure_index, index) = split_position(request.start + offset);
            self.ensure_measures(measure_index + 1);

            let state = if offset == 0 { Slot::Onset } else { Slot::Sustain };
            self.measures[measure_index].activate(request.octave, request.label, index, state);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SLOTS_PER_MEASURE;
    use crate::pitch::NoteLabel;

    fn request(octave: i8, label: NoteLabel, start: usize, length: usize) -> SlotRequest {
        SlotRequest {
            track: 0,
            instrument: None,
            channel: None,
            octave,
            label,
            start,
            length,
        }
    }

    fn lane(track: &Track, octave: i8, label: NoteLabel) -> Vec<Slot> {
        track
            .measures()
            .iter()
            .flat_map(|measure| measure.lane_slots(octave, label).unwrap().iter().copied())
            .collect()
    }

    #[test]
    fn note_becomes_onset_then_sustains() {
        let mut track = Track::new(0);
        track.add_slot(&request(4, NoteLabel::B, 2, 3));

        let slots = lane(&track, 4, NoteLabel::B);
        assert_eq!(slots.len(), SLOTS_PER_MEASURE);
        assert_eq!(
            &slots[..6],
            &[Slot::None, Slot::None, Slot::Onset, Slot::Sustain, Slot::Sustain, Slot::None]
        );
    }

    #[test]
    fn held_note_crosses_measure_boundaries() {
        let mut track = Track::new(0);
        track.add_slot(&request(4, NoteLabel::A, 4, 28));

        assert_eq!(track.measure_count(), 2);

        let slots = lane(&track, 4, NoteLabel::A);
        assert_eq!(slots[4], Slot::Onset);
        assert!(slots[5..32].iter().all(|slot| *slot == Slot::Sustain));
        assert!(slots[..4].iter().all(|slot| *slot == Slot::None));
    }

    #[test]
    fn growth_fills_every_intermediate_measure() {
        let mut track = Track::new(0);
        track.add_slot(&request(4, NoteLabel::G, 50, 1));

        assert_eq!(track.measure_count(), 4);
        assert!(track.measures()[..3].iter().all(Measure::is_silent));
        assert_eq!(lane(&track, 4, NoteLabel::G)[50], Slot::Onset);
    }

    #[test]
    fn zero_length_note_keeps_its_onset() {
        let mut track = Track::new(0);
        track.add_slot(&request(4, NoteLabel::C1, 0, 0));

        let slots = lane(&track, 4, NoteLabel::C1);
        assert_eq!(slots[0], Slot::Onset);
        assert_eq!(slots[1], Slot::None);
    }

    #[test]
    fn off_grid_octave_is_dropped() {
        let mut track = Track::new(0);
        track.add_slot(&request(12, NoteLabel::C1, 0, 4));

        assert_eq!(track.measure_count(), 0);
    }

    #[test]
    fn measures_never_shrink() {
        let mut track = Track::with_measures(0, 3);
        track.ensure_measures(1);
        track.add_slot(&request(4, NoteLabel::C1, 0, 1));
        assert_eq!(track.measure_count(), 3);
    }
}
