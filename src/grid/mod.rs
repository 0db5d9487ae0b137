mod measure;

pub use self::measure::{Measure, NoteLane, OctaveRow};

/// Sixteenth notes in one 4/4 measure.
pub const SLOTS_PER_MEASURE: usize = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    None,
    Onset,
    Sustain,
}

impl Slot {
    pub fn is_active(self) -> bool {
        self != Slot::None
    }
}

/// Splits an absolute sixteenth position into (measure index, slot within the measure).
pub fn split_position(position: usize) -> (usize, usize) {
    (position / SLOTS_PER_MEASURE, position % SLOTS_PER_MEASURE)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_default_to_none() {
        assert_eq!(Slot::default(), Slot::None);
        assert!(!Slot::default().is_active());
        assert!(Slot::Onset.is_active());
        assert!(Slot::Sustain.is_active());
    }

    #[test]
    fn positions_split_on_measure_boundaries() {
        assert_eq!(split_position(0), (0, 0));
        assert_eq!(split_position(15), (0, 15));
        assert_eq!(split_position(16), (1, 0));
        assert_eq!(split_position(35), (2, 3));
    }
}
