use crate::grid::Slot;
use crate::pitch::{NoteLabel, Pitch};

/// One quantized note, ready to be written into a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub track: usize,
    pub instrument: Option<String>,
    pub channel: Option<u8>,
    pub octave: i8,
    pub label: NoteLabel,
    pub start: usize,
    pub length: usize,
}

impl SlotRequest {
    pub fn new(track: usize, pitch: Pitch, start: usize, length: usize) -> Self {
        SlotRequest {
            track,
            instrument: None,
            channel: None,
            octave: pitch.octave.number(),
            label: pitch.label,
            start,
            length,
        }
    }
}

/// One entry of a snapshot taken at a single sixteenth position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VerticalSlot {
    pub pitch: Pitch,
    pub slot: Slot,
}
