use std::fmt::{self, Error, Write};

use crate::grid::{Slot, SLOTS_PER_MEASURE};
use crate::pitch::{Pitch, NOTE_LABELS, OCTAVES};
use crate::song::{Track, VerticalSlot};

pub trait MultiFormat<FormatStyleType> {
    fn multi_fmt<W: Write>(&self, f: &mut W, style_type: &FormatStyleType) -> fmt::Result;
}

#[derive(Debug, Clone, Copy)]
pub enum StyleType {
    Normal,
    AnsiTerm,
}

#[derive(Debug, Clone, Copy)]
pub enum Style {
    Normal,
    Yellow,
    Cyan,
    White,
}

#[derive(Debug)]
pub struct Styled<'a> {
    content: &'a str,
    style: Style,
}

impl<'a> Styled<'a> {
    pub fn new(content: &'a str, style: Style) -> Self {
        Styled { content, style }
    }
}

impl<'a> MultiFormat<StyleType> for Styled<'a> {
    fn multi_fmt<W: Write>(&self, f: &mut W, style_type: &StyleType) -> fmt::Result {
        match *style_type {
            StyleType::Normal => write!(f, "{}", self.content),
            StyleType::AnsiTerm => {
                use ansi_term::Color;

                let style = match self.style {
                    Style::Normal => ansi_term::Style::new(),
                    Style::Yellow => Color::Fixed(11).bold(),
                    Style::Cyan => Color::Fixed(14).bold(),
                    Style::White => Color::Fixed(15).bold(),
                };

                write!(f, "{}", style.paint(self.content))
            }
        }
    }
}

impl MultiFormat<StyleType> for Slot {
    fn multi_fmt<W: Write>(&self, f: &mut W, style_type: &StyleType) -> fmt::Result {
        let (content, style) = match *self {
            Slot::None => (".", Style::Normal),
            Slot::Onset => ("o", Style::Yellow),
            Slot::Sustain => ("=", Style::Cyan),
        };
        Styled::new(content, style).multi_fmt(f, style_type)
    }
}

fn pitch_name(pitch: Pitch) -> String {
    format!("{} {}", pitch.label, pitch.octave)
}

/// A text piano roll of every bucket the track ever plays, highest pitch first.
///
/// Each line is `<label> <octave>` followed by the bucket's slots, with `|`
/// between measures. A track with no notes renders as an empty string.
pub fn render_track(track: &Track, style_type: &StyleType) -> Result<String, Error> {
    let mut buffer = String::new();

    for &octave in OCTAVES.iter().rev() {
        for &label in NOTE_LABELS.iter().rev() {
            let lanes: Vec<&[Slot; SLOTS_PER_MEASURE]> = track
                .measures()
                .iter()
                .map(|measure| measure.row(octave).lane(label).slots())
                .collect();

            if !lanes.iter().any(|lane| lane.iter().any(|slot| slot.is_active())) {
                continue;
            }

            let name = pitch_name(Pitch { octave, label });
            Styled::new(&format!("{:>5} ", name), Style::White).multi_fmt(&mut buffer, style_type)?;

            for lane in lanes {
                buffer.push('|');
                for slot in lane.iter() {
                    slot.multi_fmt(&mut buffer, style_type)?;
                }
            }
            buffer.push_str("|\n");
        }
    }

    Ok(buffer)
}

/// The sounding buckets of a snapshot, one per line, highest pitch first.
pub fn render_chord(slots: &[VerticalSlot], style_type: &StyleType) -> Result<String, Error> {
    let mut buffer = String::new();

    for vertical in slots.iter().rev().filter(|vertical| vertical.slot.is_active()) {
        let state = match vertical.slot {
            Slot::Onset => "onset",
            _ => "sustain",
        };
        let name = pitch_name(vertical.pitch);
        Styled::new(&format!("{:>5} ", name), Style::White).multi_fmt(&mut buffer, style_type)?;
        vertical.slot.multi_fmt(&mut buffer, style_type)?;
        writeln!(buffer, " {}", state)?;
    }

    Ok(buffer)
}
