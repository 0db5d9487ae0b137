use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

pub const MIN_KEY: u8 = 0;
pub const MAX_KEY: u8 = 127;

pub const MIN_OCTAVE: i8 = -1;
pub const MAX_OCTAVE: i8 = 9;
pub const OCTAVE_COUNT: usize = (MAX_OCTAVE - MIN_OCTAVE + 1) as usize;

pub const NOTE_LABEL_COUNT: usize = 8;

/// One of the eight pitch buckets an octave is divided into.
///
/// Sharps and flats fold down into the natural below them, so the twelve
/// chromatic pitch classes collapse into `C1`..`B`. `C2` sits at the top of
/// every octave but no key ever lands in it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoteLabel {
    C1,
    D,
    E,
    F,
    G,
    A,
    B,
    C2,
}

pub const NOTE_LABELS: [NoteLabel; NOTE_LABEL_COUNT] = [
    NoteLabel::C1,
    NoteLabel::D,
    NoteLabel::E,
    NoteLabel::F,
    NoteLabel::G,
    NoteLabel::A,
    NoteLabel::B,
    NoteLabel::C2,
];

// Indexed by key number mod 12.
const PITCH_CLASS_LABELS: [NoteLabel; 12] = [
    NoteLabel::C1,
    NoteLabel::C1,
    NoteLabel::D,
    NoteLabel::D,
    NoteLabel::E,
    NoteLabel::F,
    NoteLabel::F,
    NoteLabel::G,
    NoteLabel::G,
    NoteLabel::A,
    NoteLabel::A,
    NoteLabel::B,
];

impl NoteLabel {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<NoteLabel> {
        NOTE_LABELS.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteLabel::C1 => "C1",
            NoteLabel::D => "D",
            NoteLabel::E => "E",
            NoteLabel::F => "F",
            NoteLabel::G => "G",
            NoteLabel::A => "A",
            NoteLabel::B => "B",
            NoteLabel::C2 => "C2",
        }
    }
}

impl Display for NoteLabel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a note label, expected one of C1, D, E, F, G, A, B, C2")]
pub struct UnknownNoteLabel(pub String);

impl FromStr for NoteLabel {
    type Err = UnknownNoteLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NOTE_LABELS
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNoteLabel(s.to_owned()))
    }
}

/// Every octave on the grid, lowest first, so `OCTAVES[i].index() == i`.
pub const OCTAVES: [Octave; OCTAVE_COUNT] = {
    let mut octaves = [Octave(MIN_OCTAVE); OCTAVE_COUNT];
    let mut index = 0;
    while index < OCTAVE_COUNT {
        octaves[index] = Octave(MIN_OCTAVE + index as i8);
        index += 1;
    }
    octaves
};

/// An octave number within the grid's fixed range of -1 to 9.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Octave(i8);

impl Octave {
    pub fn new(octave: i8) -> Option<Octave> {
        if (MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            Some(Octave(octave))
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Octave> {
        OCTAVES.get(index).copied()
    }

    pub fn number(self) -> i8 {
        self.0
    }

    /// Zero-based row index, so octave -1 is row 0.
    pub fn index(self) -> usize {
        (self.0 - MIN_OCTAVE) as usize
    }
}

impl Display for Octave {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub octave: Octave,
    pub label: NoteLabel,
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("key number {0} is outside the MIDI range 0..=127")]
pub struct KeyOutOfRange(pub u8);

pub fn quantize(key: u8) -> Result<Pitch, KeyOutOfRange> {
    if key > MAX_KEY {
        return Err(KeyOutOfRange(key));
    }

    let octave = Octave((key / 12) as i8 - 1);
    let label = PITCH_CLASS_LABELS[(key % 12) as usize];

    Ok(Pitch { octave, label })
}
