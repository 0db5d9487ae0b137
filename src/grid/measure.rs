use super::{Slot, SLOTS_PER_MEASURE};
use crate::pitch::{NoteLabel, Octave, Pitch, NOTE_LABELS, NOTE_LABEL_COUNT, OCTAVES, OCTAVE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLane {
    label: NoteLabel,
    slots: [Slot; SLOTS_PER_MEASURE],
}

impl NoteLane {
    pub fn new(label: NoteLabel) -> Self {
        NoteLane {
            label,
            slots: [Slot::None; SLOTS_PER_MEASURE],
        }
    }

    pub fn label(&self) -> NoteLabel {
        self.label
    }

    pub fn slots(&self) -> &[Slot; SLOTS_PER_MEASURE] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    /// Returns false when `index` is past the end of the measure.
    pub fn activate(&mut self, index: usize, state: Slot) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = state;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctaveRow {
    octave: Octave,
    lanes: [NoteLane; NOTE_LABEL_COUNT],
}

impl OctaveRow {
    pub fn new(octave: Octave) -> Self {
        OctaveRow {
            octave,
            lanes: NOTE_LABELS.map(NoteLane::new),
        }
    }

    pub fn octave(&self) -> Octave {
        self.octave
    }

    pub fn lanes(&self) -> &[NoteLane; NOTE_LABEL_COUNT] {
        &self.lanes
    }

    pub fn lane(&self, label: NoteLabel) -> &NoteLane {
        &self.lanes[label.index()]
    }

    pub fn lane_mut(&mut self, label: NoteLabel) -> &mut NoteLane {
        &mut self.lanes[label.index()]
    }
}

/// One sixteen-slot page of the grid across every octave and note bucket.
///
/// Rows are stored by `Octave::index` and lanes by `NoteLabel::index`, so a
/// coordinate resolves with two array lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    rows: [OctaveRow; OCTAVE_COUNT],
}

impl Default for Measure {
    fn default() -> Self {
        Measure::new()
    }
}

impl Measure {
    pub fn new() -> Self {
        Measure {
            rows: OCTAVES.map(OctaveRow::new),
        }
    }

    pub fn rows(&self) -> &[OctaveRow; OCTAVE_COUNT] {
        &self.rows
    }

    pub fn row(&self, octave: Octave) -> &OctaveRow {
        &self.rows[octave.index()]
    }

    /// Writes `state` at the given coordinate.
    ///
    /// Octave numbers outside -1..=9 and slot indices past the measure are
    /// dropped, returning false.
    pub fn activate(&mut self, octave: i8, label: NoteLabel, index: usize, state: Slot) -> bool {
        match Octave::new(octave) {
            Some(octave) => self.rows[octave.index()]
                .lane_mut(label)
                .activate(index, state),
            None => false,
        }
    }

    /// The sixteen slots of one pitch bucket, or `None` for an octave off the grid.
    pub fn lane_slots(&self, octave: i8, label: NoteLabel) -> Option<&[Slot; SLOTS_PER_MEASURE]> {
        Octave::new(octave).map(|octave| self.row(octave).lane(label).slots())
    }

    /// Every bucket's state at one slot, lowest octave first.
    pub fn column(&self, index: usize) -> Vec<(Pitch, Slot)> {
        if index >= SLOTS_PER_MEASURE {
            return Vec::new();
        }

        self.rows
            .iter()
            .flat_map(|row| {
                row.lanes().iter().map(move |lane| {
                    let pitch = Pitch {
                        octave: row.octave(),
                        label: lane.label(),
                    };
                    (pitch, lane.slots[index])
                })
            })
            .collect()
    }

    pub fn is_silent(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.lanes().iter())
            .all(|lane| lane.slots.iter().all(|slot| !slot.is_active()))
    }
}
